use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{AuthError, Authenticator, Claims};
use crate::error::ApiError;

/// Authenticated caller, available to handlers behind `require_auth` or
/// `require_admin`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

/// Caller identity when one was presented, for routes behind `optional_auth`.
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<Claims>);

/// Rejects the request unless it carries a valid bearer token; on success the
/// decoded claims are attached to the request.
pub async fn require_auth(
    State(auth): State<Arc<Authenticator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate_request(&auth, request.headers())?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Same checks as [`require_auth`], then the admin role.
pub async fn require_admin(
    State(auth): State<Arc<Authenticator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate_request(&auth, request.headers())?;
    if !claims.is_admin() {
        tracing::warn!("User {} denied admin route {}", claims.user_id, request.uri().path());
        return Err(AuthError::Forbidden.into());
    }
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Attaches claims when a valid bearer token is present and never rejects.
pub async fn optional_auth(
    State(auth): State<Arc<Authenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(claims) = authenticate_request(&auth, request.headers()) {
        request.extensions_mut().insert(claims);
    }
    next.run(request).await
}

/// Header presence, then scheme format, then signature and expiry.
fn authenticate_request(auth: &Authenticator, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let token = bearer_token(headers)?;
    auth.validate_token(token)
        .map_err(|_| AuthError::Unauthenticated("Invalid token"))
}

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// The header must split on single spaces into exactly two parts, the first
/// being the literal `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if value.is_empty() {
        return Err(AuthError::Unauthenticated("Authorization header required"));
    }

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(AuthError::Unauthenticated("Invalid authorization header format")),
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AuthError::MissingClaims.into())
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<Claims>().cloned()))
    }
}
