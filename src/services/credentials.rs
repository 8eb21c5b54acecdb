use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::{ServiceError, ServiceResult};
use crate::auth::{authorize_loaded, Claims, PasswordHasher};
use crate::database::models::{Credential, CredentialChanges, NewCredential};
use crate::database::{CredentialStore, UserStore};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCredentialsRequest {
    pub user_id: i32,

    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCredentialsRequest {
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: Option<String>,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: Option<String>,
}

/// Credential provisioning and self-service updates.
///
/// Passwords are hashed here and nowhere else; the stores only see hashes.
pub struct CredentialService {
    credentials: Arc<dyn CredentialStore>,
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl CredentialService {
    pub fn new(credentials: Arc<dyn CredentialStore>, users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self {
            credentials,
            users,
            hasher,
        }
    }

    pub async fn create(&self, req: CreateCredentialsRequest) -> ServiceResult<Credential> {
        if self.users.get_by_id(req.user_id).await?.is_none() {
            return Err(ServiceError::NotFound("User"));
        }
        if self.credentials.get_by_user_id(req.user_id).await?.is_some() {
            return Err(ServiceError::Conflict("User already has credentials".to_string()));
        }
        if self.credentials.get_by_login(&req.login).await?.is_some() {
            return Err(ServiceError::Conflict("Login already taken".to_string()));
        }

        let password_hash = self.hasher.hash(&req.password).await?;
        let credential = self
            .credentials
            .create(NewCredential {
                user_id: req.user_id,
                login: req.login,
                password_hash,
            })
            .await?;

        info!("Created credentials for user {}", credential.user_id);
        Ok(credential)
    }

    pub async fn get_for(&self, requester: &Claims, user_id: i32) -> ServiceResult<Credential> {
        let loaded = self.credentials.get_by_user_id(user_id).await?;
        Ok(authorize_loaded(requester, "Credentials", loaded)?)
    }

    pub async fn update(
        &self,
        requester: &Claims,
        user_id: i32,
        req: UpdateCredentialsRequest,
    ) -> ServiceResult<Credential> {
        let loaded = self.credentials.get_by_user_id(user_id).await?;
        let current = authorize_loaded(requester, "Credentials", loaded)?;

        let login = req.login.filter(|login| *login != current.login);
        if let Some(login) = &login {
            if self.credentials.get_by_login(login).await?.is_some() {
                return Err(ServiceError::Conflict("Login already taken".to_string()));
            }
        }

        let password_hash = match req.password {
            Some(password) => Some(self.hasher.hash(&password).await?),
            None => None,
        };

        let updated = self
            .credentials
            .update(user_id, CredentialChanges { login, password_hash })
            .await?
            .ok_or(ServiceError::NotFound("Credentials"))?;

        info!("User {} updated credentials of user {}", requester.user_id, user_id);
        Ok(updated)
    }
}
