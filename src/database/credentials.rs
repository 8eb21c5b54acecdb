use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Credential, CredentialChanges, NewCredential};
use super::store::CredentialStore;
use super::DatabaseError;

const COLUMNS: &str = "id, user_id, login, password, created_at, updated_at";

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn get_by_login(&self, login: &str) -> Result<Option<Credential>, DatabaseError> {
        let credential = sqlx::query_as::<_, Credential>(&format!(
            "SELECT {COLUMNS} FROM auth_credentials WHERE login = $1"
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credential)
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Option<Credential>, DatabaseError> {
        let credential = sqlx::query_as::<_, Credential>(&format!(
            "SELECT {COLUMNS} FROM auth_credentials WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credential)
    }

    async fn create(&self, credential: NewCredential) -> Result<Credential, DatabaseError> {
        let created = sqlx::query_as::<_, Credential>(&format!(
            "INSERT INTO auth_credentials (user_id, login, password) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(credential.user_id)
        .bind(&credential.login)
        .bind(&credential.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, user_id: i32, changes: CredentialChanges) -> Result<Option<Credential>, DatabaseError> {
        let updated = sqlx::query_as::<_, Credential>(&format!(
            "UPDATE auth_credentials SET login = COALESCE($1, login), password = COALESCE($2, password), \
             updated_at = NOW() \
             WHERE user_id = $3 RETURNING {COLUMNS}"
        ))
        .bind(changes.login)
        .bind(changes.password_hash)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }
}
