use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api_error::ApiError,
    app_state::SharedState,
    create_task_request::CreateTaskRequest,
    task::{Task, TaskId},
    update_task_request::UpdateTaskRequest,
};

/// Handlers for the `todo` list nested under a user.
pub struct TodoController {}

impl TodoController {
    pub async fn list(
        State(state): State<SharedState>,
        Path(email): Path<String>,
    ) -> Result<Json<Vec<Task>>, ApiError> {
        let user = state.gateway.find_by_email(&email)?;
        Ok(Json(user.todo))
    }

    pub async fn add(
        State(state): State<SharedState>,
        Path(email): Path<String>,
        body: Result<Json<CreateTaskRequest>, JsonRejection>,
    ) -> Result<Json<Vec<Task>>, ApiError> {
        let Json(request) = body?;
        let new_task = request.validate()?;

        let todo = state.gateway.append_task(&email, new_task)?;
        tracing::debug!(email = %email, count = todo.len(), "task appended");
        Ok(Json(todo))
    }

    pub async fn get(
        State(state): State<SharedState>,
        Path((email, task_id)): Path<(String, String)>,
    ) -> Result<Json<Task>, ApiError> {
        let task_id = parse_task_id(&state, &email, &task_id)?;
        let user = state.gateway.find_by_email(&email)?;

        user.todo_task(&task_id)
            .cloned()
            .map(Json)
            .ok_or_else(|| task_not_found(&email, &task_id.to_string()))
    }

    pub async fn edit(
        State(state): State<SharedState>,
        Path((email, task_id)): Path<(String, String)>,
        body: Result<Json<UpdateTaskRequest>, JsonRejection>,
    ) -> Result<Json<Task>, ApiError> {
        let Json(request) = body?;
        let patch = request.validate()?;
        let task_id = parse_task_id(&state, &email, &task_id)?;

        let task = state.gateway.update_task(&email, task_id, patch)?;
        tracing::debug!(email = %email, %task_id, "task updated");
        Ok(Json(task))
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Path((email, task_id)): Path<(String, String)>,
    ) -> Result<StatusCode, ApiError> {
        let task_id = parse_task_id(&state, &email, &task_id)?;

        state.gateway.delete_task(&email, task_id)?;
        tracing::debug!(email = %email, %task_id, "task deleted");
        Ok(StatusCode::NO_CONTENT)
    }
}

/// Text that is not a task id cannot match any task, but a missing user
/// still takes precedence in the reply.
fn parse_task_id(state: &SharedState, email: &str, raw: &str) -> Result<TaskId, ApiError> {
    match raw.parse::<TaskId>() {
        Ok(task_id) => Ok(task_id),
        Err(_) => {
            state.gateway.find_by_email(email)?;
            Err(task_not_found(email, raw))
        }
    }
}

fn task_not_found(email: &str, task_id: &str) -> ApiError {
    ApiError::not_found(format!("no task {task_id} in the todo list of {email}"))
}
