//! Translation of store and validation failures into HTTP responses.
//!
//! Every handler returns `Result<_, ApiError>`, so the status mapping lives in
//! exactly one place. Store outages and internal faults are logged here and
//! answered with a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store_error::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the caller. Server-side details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidInput(message) | Self::NotFound(message) => message.clone(),
            Self::Unavailable(_) => "Storage is unavailable".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unavailable(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "request failed");
            }
            Self::InvalidInput(_) | Self::NotFound(_) => {
                tracing::debug!(error = %self, "request rejected");
            }
        }

        (self.status_code(), self.public_message()).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UserNotFound { .. } | StoreError::TaskNotFound { .. } => {
                ApiError::NotFound(e.to_string())
            }
            StoreError::Unavailable(_) => ApiError::Unavailable(e.to_string()),
            StoreError::Decode(_) | StoreError::Encode(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;

    #[test]
    fn store_misses_map_to_not_found() {
        let err = ApiError::from(StoreError::user_not_found("bob@example.com"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.public_message().contains("bob@example.com"));

        let task_id = TaskId::new();
        let err = ApiError::from(StoreError::task_not_found("bob@example.com", task_id));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.public_message().contains(&task_id.to_string()));
    }

    #[test]
    fn outages_are_redacted() {
        let err = ApiError::from(StoreError::Unavailable("disk on fire at /var/db".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("/var/db"));

        let err = ApiError::from(StoreError::Decode("unexpected end of input".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn invalid_input_is_bad_request() {
        let response = ApiError::invalid_input("completed is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
