use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::role::RoleRecord;
use crate::auth::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role_id: i32,
    pub role: RoleRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role_kind(&self) -> Role {
        self.role.name
    }
}

/// Row shape of the users/roles join; role columns carry a `role_` prefix.
impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let role_name: String = row.try_get("role_name")?;
        let role = role_name
            .parse::<Role>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            role_id: row.try_get("role_id")?,
            role: RoleRecord {
                id: row.try_get("role_id")?,
                name: role,
                description: row.try_get("role_description")?,
                created_at: row.try_get("role_created_at")?,
                updated_at: row.try_get("role_updated_at")?,
            },
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role_id: i32,
}
