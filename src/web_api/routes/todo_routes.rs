use axum::{routing::get, Router};

use crate::{app_state::SharedState, todo_controller::TodoController};

pub const ROUTER_PATH: &str = "/:email/todo";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(
            ROUTER_PATH,
            get(TodoController::list).post(TodoController::add),
        )
        .route(
            format!("{}/:task_id", ROUTER_PATH).as_str(),
            get(TodoController::get)
                .put(TodoController::edit)
                .delete(TodoController::delete),
        )
        .with_state(app_state)
}
