// handlers/protected/articles.rs - POST /api/articles, PUT/DELETE /api/articles/:id

use axum::extract::{Path, State};

use crate::database::models::Article;
use crate::handlers::ValidJson;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CreateArticleRequest, UpdateArticleRequest};
use crate::state::AppState;

/// The caller becomes the author.
pub async fn create_article(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidJson(req): ValidJson<CreateArticleRequest>,
) -> ApiResult<Article> {
    let article = state.articles.create(&claims, req).await?;
    Ok(ApiResponse::created(article))
}

pub async fn update_article(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    ValidJson(req): ValidJson<UpdateArticleRequest>,
) -> ApiResult<Article> {
    let article = state.articles.update(&claims, id, req).await?;
    Ok(ApiResponse::success(article))
}

pub async fn delete_article(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.articles.delete(&claims, id).await?;
    Ok(ApiResponse::no_content())
}
