// handlers/public/articles.rs - read-only article views

use axum::extract::{Path, Query, State};
use serde::Serialize;

use crate::database::models::Article;
use crate::handlers::Pagination;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthorArticles {
    pub articles: Vec<Article>,
    pub total: i64,
}

/// GET /api/articles - newest first, with author names and rating stats
pub async fn list_articles(State(state): State<AppState>, Query(query): Query<Pagination>) -> ApiResult<Vec<Article>> {
    let articles = state.articles.list(query.page()).await?;
    Ok(ApiResponse::success(articles))
}

/// GET /api/articles/:id
pub async fn get_article(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Article> {
    let article = state.articles.get(id).await?;
    Ok(ApiResponse::success(article))
}

/// GET /api/users/:id/articles
pub async fn list_user_articles(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    Query(query): Query<Pagination>,
) -> ApiResult<AuthorArticles> {
    let (articles, total) = state.articles.list_by_author(author_id, query.page()).await?;
    Ok(ApiResponse::success(AuthorArticles { articles, total }))
}
