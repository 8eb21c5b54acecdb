use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub article_id: i32,
    pub user_id: i32,
    pub text: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Comment {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: i32,
    pub user_id: i32,
    pub text: String,
    pub rating: i32,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub text: Option<String>,
    pub rating: Option<i32>,
}
