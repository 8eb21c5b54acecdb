// handlers/protected/comments.rs - POST /api/articles/:id/comments, PUT/DELETE /api/comments/:id

use axum::extract::{Path, State};

use crate::database::models::Comment;
use crate::handlers::ValidJson;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CreateCommentRequest, UpdateCommentRequest};
use crate::state::AppState;

pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(article_id): Path<i32>,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> ApiResult<Comment> {
    let comment = state.comments.create(&claims, article_id, req).await?;
    Ok(ApiResponse::created(comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    ValidJson(req): ValidJson<UpdateCommentRequest>,
) -> ApiResult<Comment> {
    let comment = state.comments.update(&claims, id, req).await?;
    Ok(ApiResponse::success(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.comments.delete(&claims, id).await?;
    Ok(ApiResponse::no_content())
}
