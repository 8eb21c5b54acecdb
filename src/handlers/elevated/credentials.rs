// handlers/elevated/credentials.rs - POST /api/admin/credentials

use axum::extract::State;

use crate::database::models::Credential;
use crate::handlers::ValidJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CreateCredentialsRequest;
use crate::state::AppState;

/// Provisions a login for an existing user.
pub async fn create_credentials(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateCredentialsRequest>,
) -> ApiResult<Credential> {
    let credential = state.credentials.create(req).await?;
    Ok(ApiResponse::created(credential))
}
