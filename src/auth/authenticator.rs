use chrono::Duration;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{AuthError, Claims, PasswordHasher, TokenCodec};
use crate::config::SecurityConfig;
use crate::database::models::User;
use crate::database::{CredentialStore, UserStore};

/// Resolves login/password pairs to users and mints their access tokens.
pub struct Authenticator {
    credentials: Arc<dyn CredentialStore>,
    users: Arc<dyn UserStore>,
    tokens: TokenCodec,
    hasher: PasswordHasher,
    /// Hash checked when there is no real one, so every failed login pays for bcrypt
    decoy_hash: OnceCell<String>,
}

impl Authenticator {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        users: Arc<dyn UserStore>,
        tokens: TokenCodec,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            credentials,
            users,
            tokens,
            hasher,
            decoy_hash: OnceCell::new(),
        }
    }

    pub fn from_config(
        security: &SecurityConfig,
        credentials: Arc<dyn CredentialStore>,
        users: Arc<dyn UserStore>,
    ) -> Result<Self, AuthError> {
        Ok(Self::new(
            credentials,
            users,
            TokenCodec::from_config(security)?,
            PasswordHasher::new(security.bcrypt_cost)?,
        ))
    }

    /// Returns the user owning `login` when `password` matches its stored hash.
    ///
    /// An unknown login, a credential without a user and a wrong password all
    /// fail with the same [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<User, AuthError> {
        let Some(credential) = self.credentials.get_by_login(login).await? else {
            warn!("Login attempt for unknown login");
            self.burn_verify(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.users.get_by_id(credential.user_id).await? else {
            warn!("Credential {} points at missing user {}", credential.id, credential.user_id);
            self.burn_verify(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &credential.password).await? {
            warn!("Password mismatch for user {}", credential.user_id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("User {} authenticated", user.id);
        Ok(user)
    }

    async fn burn_verify(&self, password: &str) -> Result<(), AuthError> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash("decoy-password-never-matches"))
            .await?;
        self.hasher.verify(password, decoy).await?;
        Ok(())
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        self.tokens.issue(user.id, &user.email, user.role_kind())
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    pub fn hasher(&self) -> PasswordHasher {
        self.hasher
    }

    pub fn token_ttl(&self) -> Duration {
        self.tokens.ttl()
    }
}
