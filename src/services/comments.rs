use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::{ServiceError, ServiceResult};
use crate::auth::{authorize_loaded, Claims};
use crate::database::models::{Comment, CommentChanges, NewComment};
use crate::database::{ArticleStore, CommentStore, Page};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Text cannot be empty"))]
    pub text: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    articles: Arc<dyn ArticleStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, articles: Arc<dyn ArticleStore>) -> Self {
        Self { comments, articles }
    }

    pub async fn create(&self, author: &Claims, article_id: i32, req: CreateCommentRequest) -> ServiceResult<Comment> {
        self.require_article(article_id).await?;

        let comment = self
            .comments
            .create(NewComment {
                article_id,
                user_id: author.user_id,
                text: req.text,
                rating: req.rating,
            })
            .await?;

        info!("User {} commented on article {}", author.user_id, article_id);
        Ok(comment)
    }

    pub async fn list_for_article(&self, article_id: i32, page: Page) -> ServiceResult<Vec<Comment>> {
        self.require_article(article_id).await?;
        Ok(self.comments.list_by_article(article_id, page).await?)
    }

    pub async fn update(&self, requester: &Claims, id: i64, req: UpdateCommentRequest) -> ServiceResult<Comment> {
        let loaded = self.comments.get(id).await?;
        authorize_loaded(requester, "Comment", loaded)?;

        let updated = self
            .comments
            .update(
                id,
                CommentChanges {
                    text: req.text,
                    rating: req.rating,
                },
            )
            .await?
            .ok_or(ServiceError::NotFound("Comment"))?;

        info!("User {} updated comment {}", requester.user_id, id);
        Ok(updated)
    }

    pub async fn delete(&self, requester: &Claims, id: i64) -> ServiceResult<()> {
        let loaded = self.comments.get(id).await?;
        authorize_loaded(requester, "Comment", loaded)?;

        if !self.comments.delete(id).await? {
            return Err(ServiceError::NotFound("Comment"));
        }
        info!("User {} deleted comment {}", requester.user_id, id);
        Ok(())
    }

    async fn require_article(&self, article_id: i32) -> ServiceResult<()> {
        match self.articles.get(article_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound("Article")),
        }
    }
}
