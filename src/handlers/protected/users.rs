// handlers/protected/users.rs - GET /api/users/:id

use axum::extract::{Path, State};

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<User> {
    let user = state.users.get(id).await?;
    Ok(ApiResponse::success(user))
}
