use serde::Deserialize;

use crate::{api_error::ApiError, task::NewTask};

/// Body of `POST /{email}/todo`. Fields are optional here so that a missing
/// field is reported as invalid input rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl CreateTaskRequest {
    pub fn validate(self) -> Result<NewTask, ApiError> {
        let description = match self.description {
            Some(description) => non_empty("description", description)?,
            None => return Err(ApiError::invalid_input("description is required")),
        };
        let completed = self
            .completed
            .ok_or_else(|| ApiError::invalid_input("completed is required"))?;

        Ok(NewTask {
            description,
            completed,
        })
    }
}

pub(crate) fn non_empty(field: &str, value: String) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(value)
}
