use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use validator::{Validate, ValidationError};

use super::{ServiceError, ServiceResult};
use crate::auth::{PasswordHasher, Role};
use crate::database::models::{NewLogin, NewUser, User};
use crate::database::{CredentialStore, DatabaseError, Page, RoleStore, UserStore};

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "login_and_password_together"))]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    /// Optional login to create together with the user
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
}

fn login_and_password_together(req: &CreateUserRequest) -> Result<(), ValidationError> {
    if req.login.is_some() != req.password.is_some() {
        let mut err = ValidationError::new("login_password_pair");
        err.message = Some("Login and password must be provided together".into());
        return Err(err);
    }
    Ok(())
}

pub struct UserService {
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
    credentials: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        credentials: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            roles,
            credentials,
            hasher,
        }
    }

    /// Registers a user with the default "user" role, plus a credential when
    /// both login and password are supplied.
    pub async fn create(&self, req: CreateUserRequest) -> ServiceResult<User> {
        if self.users.get_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::Conflict(format!("User with email {} already exists", req.email)));
        }

        let credential = match (req.login, req.password) {
            (Some(login), Some(password)) => {
                if self.credentials.get_by_login(&login).await?.is_some() {
                    return Err(ServiceError::Conflict("Login already taken".to_string()));
                }
                let password_hash = self.hasher.hash(&password).await?;
                Some(NewLogin { login, password_hash })
            }
            (None, None) => None,
            _ => return Err(ServiceError::Invalid("Login and password must be provided together")),
        };

        let role = self
            .roles
            .get_by_name(Role::User)
            .await?
            .ok_or(ServiceError::NotFound("Role"))?;

        let new_user = NewUser {
            email: req.email,
            name: req.name,
            role_id: role.id,
        };
        // User and credential are inserted together or not at all
        let user = match credential {
            Some(credential) => self.users.create_with_credential(new_user, credential).await,
            None => self.users.create(new_user).await,
        }
        .map_err(|e| match e {
            DatabaseError::Conflict(constraint) if constraint.contains("login") => {
                ServiceError::Conflict("Login already taken".to_string())
            }
            DatabaseError::Conflict(_) => ServiceError::Conflict("User with this email already exists".to_string()),
            other => other.into(),
        })?;

        info!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn get(&self, id: i32) -> ServiceResult<User> {
        self.users.get_by_id(id).await?.ok_or(ServiceError::NotFound("User"))
    }

    pub async fn list(&self, page: Page) -> ServiceResult<Vec<User>> {
        Ok(self.users.list(page).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    fn service(store: &Arc<MemoryStore>) -> UserService {
        UserService::new(store.clone(), store.clone(), store.clone(), PasswordHasher::new(4).unwrap())
    }

    fn request(email: &str, login: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            name: "Alice".to_string(),
            login: login.map(str::to_string),
            password: login.map(|_| "secret123".to_string()),
        }
    }

    #[tokio::test]
    async fn new_users_get_the_user_role() {
        let store = MemoryStore::new();
        let user = service(&store).create(request("alice@example.com", None)).await.unwrap();

        assert_eq!(user.role_kind(), Role::User);
        assert!(store.credential_for(user.id).is_none());
    }

    #[tokio::test]
    async fn login_and_password_create_a_hashed_credential() {
        let store = MemoryStore::new();
        let user = service(&store)
            .create(request("alice@example.com", Some("alice")))
            .await
            .unwrap();

        let credential = store.credential_for(user.id).unwrap();
        assert_eq!(credential.login, "alice");
        assert_ne!(credential.password, "secret123");
        assert!(bcrypt::verify("secret123", &credential.password).unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let svc = service(&store);
        svc.create(request("alice@example.com", None)).await.unwrap();

        let err = svc.create(request("alice@example.com", None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn taken_login_conflicts_before_the_user_is_created() {
        let store = MemoryStore::new();
        let svc = service(&store);
        svc.create(request("alice@example.com", Some("alice"))).await.unwrap();

        let err = svc.create(request("other@example.com", Some("alice"))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(svc.list(Page::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn racing_registrations_for_one_login_leave_no_orphan_user() {
        let store = MemoryStore::new();
        let svc = service(&store);

        let (a, b) = tokio::join!(
            svc.create(request("a@example.com", Some("same"))),
            svc.create(request("b@example.com", Some("same"))),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(loser, Err(ServiceError::Conflict(_))));

        let users = svc.list(Page::default()).await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(store.credential_for(users[0].id).is_some());
    }

    #[tokio::test]
    async fn login_without_password_is_rejected() {
        let store = MemoryStore::new();
        let req = CreateUserRequest {
            email: "carol@example.com".to_string(),
            name: "Carol".to_string(),
            login: Some("carol".to_string()),
            password: None,
        };
        assert!(req.validate().is_err());

        let err = service(&store).create(req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(service(&store).list(Page::default()).await.unwrap().is_empty());
    }

    #[test]
    fn password_without_login_fails_validation() {
        let req = CreateUserRequest {
            email: "carol@example.com".to_string(),
            name: "Carol".to_string(),
            login: None,
            password: Some("secret123".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn request_validation_reports_each_field() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            name: "A".to_string(),
            login: Some("ab".to_string()),
            password: None,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("login"));
    }
}
