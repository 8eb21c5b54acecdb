pub mod articles;
pub mod comments;
pub mod credentials;
pub mod users;

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

pub use articles::{ArticleService, CreateArticleRequest, UpdateArticleRequest};
pub use comments::{CommentService, CreateCommentRequest, UpdateCommentRequest};
pub use credentials::{CreateCredentialsRequest, CredentialService, UpdateCredentialsRequest};
pub use users::{CreateUserRequest, UserService};

/// Errors raised by the resource services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
