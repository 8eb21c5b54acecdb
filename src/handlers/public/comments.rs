// handlers/public/comments.rs - GET /api/articles/:id/comments

use axum::extract::{Path, Query, State};

use crate::database::models::Comment;
use crate::handlers::Pagination;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<i32>,
    Query(query): Query<Pagination>,
) -> ApiResult<Vec<Comment>> {
    let comments = state.comments.list_for_article(article_id, query.page()).await?;
    Ok(ApiResponse::success(comments))
}
