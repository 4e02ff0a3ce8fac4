use serde::Deserialize;

use crate::{api_error::ApiError, create_task_request::non_empty, task::TaskPatch};

/// Body of `PUT /{email}/todo/{taskId}`. Absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn validate(self) -> Result<TaskPatch, ApiError> {
        if self.description.is_none() && self.completed.is_none() {
            return Err(ApiError::invalid_input(
                "request body must set description or completed",
            ));
        }

        let description = self
            .description
            .map(|description| non_empty("description", description))
            .transpose()?;

        Ok(TaskPatch {
            description,
            completed: self.completed,
        })
    }
}
