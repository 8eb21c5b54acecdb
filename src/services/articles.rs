use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::{ServiceError, ServiceResult};
use crate::auth::{authorize_loaded, Claims};
use crate::database::models::{Article, ArticleChanges, NewArticle};
use crate::database::{ArticleStore, CommentStore, Page, UserStore};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: Option<String>,
}

pub struct ArticleService {
    articles: Arc<dyn ArticleStore>,
    comments: Arc<dyn CommentStore>,
    users: Arc<dyn UserStore>,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleStore>, comments: Arc<dyn CommentStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            articles,
            comments,
            users,
        }
    }

    pub async fn create(&self, author: &Claims, req: CreateArticleRequest) -> ServiceResult<Article> {
        if self.users.get_by_id(author.user_id).await?.is_none() {
            return Err(ServiceError::NotFound("Author"));
        }

        let article = self
            .articles
            .create(NewArticle {
                title: req.title,
                content: req.content,
                author_id: author.user_id,
            })
            .await?;

        info!("User {} created article {}", author.user_id, article.id);
        Ok(article)
    }

    pub async fn get(&self, id: i32) -> ServiceResult<Article> {
        let article = self.articles.get(id).await?.ok_or(ServiceError::NotFound("Article"))?;
        self.with_stats(article).await
    }

    pub async fn list(&self, page: Page) -> ServiceResult<Vec<Article>> {
        let mut listed = Vec::new();
        for article in self.articles.list(page).await? {
            listed.push(self.with_stats(article).await?);
        }
        Ok(listed)
    }

    /// One page of an author's articles plus their total count.
    pub async fn list_by_author(&self, author_id: i32, page: Page) -> ServiceResult<(Vec<Article>, i64)> {
        let articles = self.articles.list_by_author(author_id, page).await?;
        let total = self.articles.count_by_author(author_id).await?;
        Ok((articles, total))
    }

    pub async fn update(&self, requester: &Claims, id: i32, req: UpdateArticleRequest) -> ServiceResult<Article> {
        let loaded = self.articles.get(id).await?;
        authorize_loaded(requester, "Article", loaded)?;

        let changes = ArticleChanges {
            title: req.title.filter(|t| !t.is_empty()),
            content: req.content.filter(|c| !c.is_empty()),
        };
        let updated = self
            .articles
            .update(id, changes)
            .await?
            .ok_or(ServiceError::NotFound("Article"))?;

        info!("User {} updated article {}", requester.user_id, id);
        self.with_stats(updated).await
    }

    pub async fn delete(&self, requester: &Claims, id: i32) -> ServiceResult<()> {
        let loaded = self.articles.get(id).await?;
        authorize_loaded(requester, "Article", loaded)?;

        if !self.articles.delete(id).await? {
            return Err(ServiceError::NotFound("Article"));
        }
        info!("User {} deleted article {}", requester.user_id, id);
        Ok(())
    }

    async fn with_stats(&self, article: Article) -> ServiceResult<Article> {
        let stats = self.comments.rating_stats(article.id).await?;
        Ok(article.with_stats(stats))
    }
}
