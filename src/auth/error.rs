use thiserror::Error;

use crate::database::DatabaseError;

/// Failures of the authentication and authorization core.
///
/// Every variant ends the current request. The credential and token variants
/// carry no detail about which check failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("Admin access required")]
    Forbidden,

    #[error("Access denied")]
    AccessDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// A handler asked for the authenticated user but no guard ran before it.
    #[error("Authenticated user missing from request context")]
    MissingClaims,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Invalid auth configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}
