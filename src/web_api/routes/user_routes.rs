use axum::{routing::get, Router};

use crate::{app_state::SharedState, user_controller::UserController};

pub const ROUTER_PATH: &str = "/";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(UserController::get_all))
        .with_state(app_state)
}
