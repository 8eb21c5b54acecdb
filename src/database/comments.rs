use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Comment, CommentChanges, NewComment, RatingStats};
use super::store::{CommentStore, Page};
use super::DatabaseError;

const COLUMNS: &str = "id, article_id, user_id, text, rating, created_at, updated_at";

pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let created = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (article_id, user_id, text, rating) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(comment.article_id)
        .bind(comment.user_id)
        .bind(&comment.text)
        .bind(comment.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn get(&self, id: i64) -> Result<Option<Comment>, DatabaseError> {
        let comment = sqlx::query_as::<_, Comment>(&format!("SELECT {COLUMNS} FROM comments WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn list_by_article(&self, article_id: i32, page: Page) -> Result<Vec<Comment>, DatabaseError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COLUMNS} FROM comments WHERE article_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(article_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn update(&self, id: i64, changes: CommentChanges) -> Result<Option<Comment>, DatabaseError> {
        let updated = sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET text = COALESCE($1, text), rating = COALESCE($2, rating), updated_at = NOW() \
             WHERE id = $3 RETURNING {COLUMNS}"
        ))
        .bind(changes.text)
        .bind(changes.rating)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn rating_stats(&self, article_id: i32) -> Result<RatingStats, DatabaseError> {
        let (average, count): (f64, i64) = sqlx::query_as(
            "SELECT COALESCE(AVG(rating)::float8, 0), COUNT(*) FROM comments WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(RatingStats { average, count })
    }
}
