use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::auth::Owned;

/// Login name and bcrypt hash bound to one user.
///
/// The hash is never serialized; responses only ever show the login.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Credential {
    pub id: i32,
    pub user_id: i32,
    pub login: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Credential {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

/// `password_hash` must already be hashed; stores never see plaintext.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub user_id: i32,
    pub login: String,
    pub password_hash: String,
}

/// Credential for a user that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewLogin {
    pub login: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct CredentialChanges {
    pub login: Option<String>,
    pub password_hash: Option<String>,
}
