// handlers/elevated/users.rs - GET /api/admin/users

use axum::extract::{Query, State};

use crate::database::models::User;
use crate::handlers::Pagination;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn list_users(State(state): State<AppState>, Query(query): Query<Pagination>) -> ApiResult<Vec<User>> {
    let users = state.users.list(query.page()).await?;
    Ok(ApiResponse::success(users))
}
