use thiserror::Error;

use crate::task::TaskId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no user with email {email}")]
    UserNotFound { email: String },
    #[error("no task {task_id} in the todo list of {email}")]
    TaskNotFound { email: String, task_id: TaskId },
    #[error("redb: {0}")]
    Unavailable(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("encode: {0}")]
    Encode(String),
}

impl StoreError {
    pub fn user_not_found(email: &str) -> Self {
        Self::UserNotFound {
            email: email.to_string(),
        }
    }

    pub fn task_not_found(email: &str, task_id: TaskId) -> Self {
        Self::TaskNotFound {
            email: email.to_string(),
            task_id,
        }
    }
}

// redb 2.x has many error types. Blanket them all into StoreError::Unavailable.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Unavailable(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);
