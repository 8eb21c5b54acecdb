use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    /// Only filled by the list query, which joins users
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[sqlx(skip)]
    pub rating_avg: f64,
    #[sqlx(skip)]
    pub rating_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn with_stats(mut self, stats: RatingStats) -> Self {
        self.rating_avg = stats.average;
        self.rating_count = stats.count;
        self
    }
}

impl Owned for Article {
    fn owner_id(&self) -> i32 {
        self.author_id
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Average comment rating of an article; zero when it has no comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    pub average: f64,
    pub count: i64,
}
