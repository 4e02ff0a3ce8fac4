pub mod health_controller;
pub mod todo_controller;
pub mod user_controller;
