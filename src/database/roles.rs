use async_trait::async_trait;
use sqlx::PgPool;

use super::models::RoleRecord;
use super::store::RoleStore;
use super::DatabaseError;
use crate::auth::Role;

pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<RoleRecord>, DatabaseError> {
        let role = sqlx::query_as::<_, RoleRecord>(
            "SELECT id, name, description, created_at, updated_at FROM roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    async fn get_by_name(&self, role: Role) -> Result<Option<RoleRecord>, DatabaseError> {
        let role = sqlx::query_as::<_, RoleRecord>(
            "SELECT id, name, description, created_at, updated_at FROM roles WHERE name = $1",
        )
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    async fn list(&self) -> Result<Vec<RoleRecord>, DatabaseError> {
        let roles = sqlx::query_as::<_, RoleRecord>(
            "SELECT id, name, description, created_at, updated_at FROM roles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }
}
