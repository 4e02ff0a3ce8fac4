use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    task::{NewTask, Task, TaskId, TaskPatch},
    user_add_request::UserAddRequest,
};

/// A user document. Owns its tasks; nothing else references them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub todo: Vec<Task>,
    #[serde(default)]
    pub doing: Vec<Task>,
    #[serde(default)]
    pub done: Vec<Task>,
}

impl User {
    pub fn new(request: UserAddRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            todo: Vec::new(),
            doing: Vec::new(),
            done: Vec::new(),
        }
    }

    /// Appends a fresh task to `todo` and returns the whole list.
    pub fn push_todo(&mut self, new_task: NewTask) -> &[Task] {
        self.todo.push(Task::new(new_task));
        &self.todo
    }

    pub fn todo_task(&self, id: &TaskId) -> Option<&Task> {
        self.todo.iter().find(|task| task.id == *id)
    }

    /// Merges `patch` into the first `todo` task with this id.
    pub fn patch_todo(&mut self, id: &TaskId, patch: TaskPatch) -> Option<&Task> {
        let task = self.todo.iter_mut().find(|task| task.id == *id)?;
        task.apply(patch);
        Some(&*task)
    }

    /// Removes the first `todo` task with this id. `doing` and `done` are left alone.
    pub fn remove_todo(&mut self, id: &TaskId) -> Option<Task> {
        let position = self.todo.iter().position(|task| task.id == *id)?;
        Some(self.todo.remove(position))
    }
}
