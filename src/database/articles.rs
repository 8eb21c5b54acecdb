use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Article, ArticleChanges, NewArticle};
use super::store::{ArticleStore, Page};
use super::DatabaseError;

const COLUMNS: &str = "id, title, content, author_id, created_at, updated_at";

// Wraps a writing statement so the returned row carries the author's name like reads do
const WITH_AUTHOR: &str = "SELECT a.id, a.title, a.content, a.author_id, u.name AS author_name, a.created_at, a.updated_at \
     FROM written a LEFT JOIN users u ON u.id = a.author_id";

pub struct PgArticleStore {
    pool: PgPool,
}

impl PgArticleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn create(&self, article: NewArticle) -> Result<Article, DatabaseError> {
        let created = sqlx::query_as::<_, Article>(&format!(
            "WITH written AS (\
             INSERT INTO articles (title, content, author_id) VALUES ($1, $2, $3) RETURNING {COLUMNS}\
             ) {WITH_AUTHOR}"
        ))
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn get(&self, id: i32) -> Result<Option<Article>, DatabaseError> {
        let article = sqlx::query_as::<_, Article>(
            "SELECT a.id, a.title, a.content, a.author_id, u.name AS author_name, a.created_at, a.updated_at \
             FROM articles a LEFT JOIN users u ON u.id = a.author_id WHERE a.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(article)
    }

    async fn update(&self, id: i32, changes: ArticleChanges) -> Result<Option<Article>, DatabaseError> {
        let updated = sqlx::query_as::<_, Article>(&format!(
            "WITH written AS (\
             UPDATE articles SET title = COALESCE($1, title), content = COALESCE($2, content), updated_at = NOW() \
             WHERE id = $3 RETURNING {COLUMNS}\
             ) {WITH_AUTHOR}"
        ))
        .bind(changes.title)
        .bind(changes.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: Page) -> Result<Vec<Article>, DatabaseError> {
        let articles = sqlx::query_as::<_, Article>(
            "SELECT a.id, a.title, a.content, a.author_id, u.name AS author_name, a.created_at, a.updated_at \
             FROM articles a LEFT JOIN users u ON u.id = a.author_id \
             ORDER BY a.created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    async fn list_by_author(&self, author_id: i32, page: Page) -> Result<Vec<Article>, DatabaseError> {
        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {COLUMNS} FROM articles WHERE author_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(author_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    async fn count_by_author(&self, author_id: i32) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
