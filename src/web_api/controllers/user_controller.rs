use axum::{extract::State, Json};

use crate::{api_error::ApiError, app_state::SharedState, user::User};

pub struct UserController {}

impl UserController {
    pub async fn get_all(State(state): State<SharedState>) -> Result<Json<Vec<User>>, ApiError> {
        let users = state.gateway.find_all()?;
        if users.is_empty() {
            return Err(ApiError::not_found("no users found"));
        }
        Ok(Json(users))
    }
}
