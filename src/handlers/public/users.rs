// handlers/public/users.rs - POST /api/users

use axum::extract::State;

use crate::database::models::User;
use crate::handlers::ValidJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CreateUserRequest;
use crate::state::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> ApiResult<User> {
    let user = state.users.create(req).await?;
    Ok(ApiResponse::created(user))
}
