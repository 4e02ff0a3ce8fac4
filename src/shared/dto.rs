// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod user_add_request;
