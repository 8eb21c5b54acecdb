use std::sync::Arc;

use crate::auth::{AuthError, Authenticator};
use crate::config::SecurityConfig;
use crate::database::{HealthCheck, RoleStore, Stores};
use crate::services::{ArticleService, CommentService, CredentialService, UserService};

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<UserService>,
    pub credentials: Arc<CredentialService>,
    pub articles: Arc<ArticleService>,
    pub comments: Arc<CommentService>,
    pub roles: Arc<dyn RoleStore>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Fails when the signing secret or bcrypt cost is unusable.
    pub fn new(security: &SecurityConfig, stores: Stores) -> Result<Self, AuthError> {
        let authenticator = Authenticator::from_config(security, stores.credentials.clone(), stores.users.clone())?;
        let hasher = authenticator.hasher();

        Ok(Self {
            users: Arc::new(UserService::new(
                stores.users.clone(),
                stores.roles.clone(),
                stores.credentials.clone(),
                hasher,
            )),
            credentials: Arc::new(CredentialService::new(
                stores.credentials.clone(),
                stores.users.clone(),
                hasher,
            )),
            articles: Arc::new(ArticleService::new(
                stores.articles.clone(),
                stores.comments.clone(),
                stores.users.clone(),
            )),
            comments: Arc::new(CommentService::new(stores.comments, stores.articles)),
            authenticator: Arc::new(authenticator),
            roles: stores.roles,
            health: stores.health,
        })
    }
}
