// handlers/elevated/roles.rs - GET /api/admin/roles[/:id]

use axum::extract::{Path, State};

use crate::database::models::RoleRecord;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Vec<RoleRecord>> {
    let roles = state.roles.list().await?;
    Ok(ApiResponse::success(roles))
}

pub async fn get_role(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<RoleRecord> {
    let role = state
        .roles
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Role not found"))?;
    Ok(ApiResponse::success(role))
}
