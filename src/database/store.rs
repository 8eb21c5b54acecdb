//! Storage contracts consumed by the auth core and the resource services.
//!
//! Lookups return `Ok(None)` for a missing row; callers decide what absence
//! means (a credential failure, a 404, ...).

use async_trait::async_trait;

use super::models::{
    Article, ArticleChanges, Comment, CommentChanges, Credential, CredentialChanges, NewArticle, NewComment,
    NewCredential, NewLogin, NewUser, RatingStats, RoleRecord, User,
};
use super::DatabaseError;
use crate::auth::Role;

/// Limit/offset window for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_by_login(&self, login: &str) -> Result<Option<Credential>, DatabaseError>;
    async fn get_by_user_id(&self, user_id: i32) -> Result<Option<Credential>, DatabaseError>;
    async fn create(&self, credential: NewCredential) -> Result<Credential, DatabaseError>;
    async fn update(&self, user_id: i32, changes: CredentialChanges) -> Result<Option<Credential>, DatabaseError>;
}

/// Users are always returned with their role resolved.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, DatabaseError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;
    /// Inserts the user and its credential in one transaction.
    async fn create_with_credential(&self, user: NewUser, credential: NewLogin) -> Result<User, DatabaseError>;
    async fn list(&self, page: Page) -> Result<Vec<User>, DatabaseError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<RoleRecord>, DatabaseError>;
    async fn get_by_name(&self, role: Role) -> Result<Option<RoleRecord>, DatabaseError>;
    async fn list(&self) -> Result<Vec<RoleRecord>, DatabaseError>;
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn create(&self, article: NewArticle) -> Result<Article, DatabaseError>;
    async fn get(&self, id: i32) -> Result<Option<Article>, DatabaseError>;
    async fn update(&self, id: i32, changes: ArticleChanges) -> Result<Option<Article>, DatabaseError>;
    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;
    /// Newest first, with the author's name joined in
    async fn list(&self, page: Page) -> Result<Vec<Article>, DatabaseError>;
    async fn list_by_author(&self, author_id: i32, page: Page) -> Result<Vec<Article>, DatabaseError>;
    async fn count_by_author(&self, author_id: i32) -> Result<i64, DatabaseError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError>;
    async fn get(&self, id: i64) -> Result<Option<Comment>, DatabaseError>;
    async fn list_by_article(&self, article_id: i32, page: Page) -> Result<Vec<Comment>, DatabaseError>;
    async fn update(&self, id: i64, changes: CommentChanges) -> Result<Option<Comment>, DatabaseError>;
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
    async fn rating_stats(&self, article_id: i32) -> Result<RatingStats, DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
