pub mod articles;
pub mod comments;
pub mod credentials;
pub mod manager;
pub mod models;
pub mod roles;
pub mod store;
pub mod users;

use std::sync::Arc;

pub use manager::{DatabaseError, DatabaseManager};
pub use store::{ArticleStore, CommentStore, CredentialStore, HealthCheck, Page, RoleStore, UserStore};

/// Every store the application talks to, behind trait objects.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub roles: Arc<dyn RoleStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub articles: Arc<dyn ArticleStore>,
    pub comments: Arc<dyn CommentStore>,
    pub health: Arc<dyn HealthCheck>,
}

impl Stores {
    pub fn postgres(db: &DatabaseManager) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(users::PgUserStore::new(pool.clone())),
            roles: Arc::new(roles::PgRoleStore::new(pool.clone())),
            credentials: Arc::new(credentials::PgCredentialStore::new(pool.clone())),
            articles: Arc::new(articles::PgArticleStore::new(pool.clone())),
            comments: Arc::new(comments::PgCommentStore::new(pool)),
            health: Arc::new(db.clone()),
        }
    }
}
