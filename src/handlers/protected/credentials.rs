// handlers/protected/credentials.rs - GET/PUT /api/users/:id/credentials
//
// Owner or admin only. The password hash never leaves the service layer.

use axum::extract::{Path, State};

use crate::database::models::Credential;
use crate::handlers::ValidJson;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UpdateCredentialsRequest;
use crate::state::AppState;

pub async fn get_credentials(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i32>,
) -> ApiResult<Credential> {
    let credential = state.credentials.get_for(&claims, user_id).await?;
    Ok(ApiResponse::success(credential))
}

pub async fn update_credentials(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i32>,
    ValidJson(req): ValidJson<UpdateCredentialsRequest>,
) -> ApiResult<Credential> {
    let credential = state.credentials.update(&claims, user_id, req).await?;
    Ok(ApiResponse::success(credential))
}
