use crate::{
    store_error::StoreError,
    task::{NewTask, Task, TaskId, TaskPatch},
    user::User,
    user_add_request::UserAddRequest,
};

/// Everything the handlers need from the document store.
///
/// Each call touches at most one user document. Nothing is retried.
pub trait UserGateway: Send + Sync {
    fn find_all(&self) -> Result<Vec<User>, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Appends to `todo` and returns the updated list. The task id is assigned here.
    fn append_task(&self, email: &str, new_task: NewTask) -> Result<Vec<Task>, StoreError>;

    fn update_task(
        &self,
        email: &str,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, StoreError>;

    fn delete_task(&self, email: &str, task_id: TaskId) -> Result<(), StoreError>;

    fn insert_user(&self, request: UserAddRequest) -> Result<User, StoreError>;
}
