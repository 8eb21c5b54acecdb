pub mod article;
pub mod comment;
pub mod credential;
pub mod role;
pub mod user;

pub use article::{Article, ArticleChanges, NewArticle, RatingStats};
pub use comment::{Comment, CommentChanges, NewComment};
pub use credential::{Credential, CredentialChanges, NewCredential, NewLogin};
pub use role::RoleRecord;
pub use user::{NewUser, User};
