// handlers/public/auth.rs - POST /api/auth/login

use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::models::User;
use crate::handlers::ValidJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Exchanges a login/password pair for an access token.
///
/// Every credential failure is the same 401 "Invalid credentials".
pub async fn login(State(state): State<AppState>, ValidJson(req): ValidJson<LoginRequest>) -> ApiResult<LoginResponse> {
    let auth = &state.authenticator;
    let user = auth.authenticate(&req.login, &req.password).await?;
    let token = auth.generate_token(&user)?;

    Ok(ApiResponse::success(LoginResponse {
        token,
        user,
        expires_in: auth.token_ttl().num_seconds(),
    }))
}
