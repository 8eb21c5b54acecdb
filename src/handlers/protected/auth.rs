// handlers/protected/auth.rs - GET /api/auth/profile

use axum::extract::State;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// The caller's own user record, resolved from the token's user id.
pub async fn profile(State(state): State<AppState>, AuthUser(claims): AuthUser) -> ApiResult<User> {
    let user = state.users.get(claims.user_id).await?;
    Ok(ApiResponse::success(user))
}
