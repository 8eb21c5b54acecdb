//! In-memory stores and fixtures shared by unit and router tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::auth::{Claims, Role};
use crate::config::SecurityConfig;
use crate::database::models::{
    Article, ArticleChanges, Comment, CommentChanges, Credential, CredentialChanges, NewArticle, NewComment,
    NewCredential, NewLogin, NewUser, RatingStats, RoleRecord, User,
};
use crate::database::{
    ArticleStore, CommentStore, CredentialStore, DatabaseError, HealthCheck, Page, RoleStore, Stores, UserStore,
};
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

pub fn security_config() -> SecurityConfig {
    SecurityConfig {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiry_hours: 24,
        bcrypt_cost: 4,
        enable_cors: false,
        cors_origins: vec![],
    }
}

pub fn claims(user_id: i32, role: Role) -> Claims {
    Claims::new(user_id, format!("user{}@example.com", user_id), role, Utc::now(), Duration::hours(1))
}

#[derive(Default)]
struct Tables {
    roles: Vec<RoleRecord>,
    users: Vec<User>,
    credentials: Vec<Credential>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
}

impl Tables {
    /// Builds the row a user insert would produce, checking email and role.
    fn new_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }
        let role = self
            .roles
            .iter()
            .find(|r| r.id == user.role_id)
            .cloned()
            .ok_or_else(|| DatabaseError::InvalidReference("users_role_id_fkey".to_string()))?;
        let now = Utc::now();
        Ok(User {
            id: self.users.len() as i32 + 1,
            email: user.email,
            name: user.name,
            role_id: role.id,
            role,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Backs every store trait with plain vectors. Unique and foreign key
/// constraints mirror the SQL schema closely enough for service tests.
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        let now = Utc::now();
        let roles = vec![
            RoleRecord {
                id: 1,
                name: Role::User,
                description: "Regular user".to_string(),
                created_at: now,
                updated_at: now,
            },
            RoleRecord {
                id: 2,
                name: Role::Admin,
                description: "Administrator".to_string(),
                created_at: now,
                updated_at: now,
            },
        ];
        Arc::new(Self {
            tables: Mutex::new(Tables {
                roles,
                ..Default::default()
            }),
        })
    }

    pub fn stores(self: &Arc<Self>) -> Stores {
        Stores {
            users: self.clone(),
            roles: self.clone(),
            credentials: self.clone(),
            articles: self.clone(),
            comments: self.clone(),
            health: self.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn insert_user(&self, email: &str, name: &str, role: Role) -> User {
        let mut t = self.lock();
        let role = t.roles.iter().find(|r| r.name == role).cloned().unwrap();
        let now = Utc::now();
        let user = User {
            id: t.users.len() as i32 + 1,
            email: email.to_string(),
            name: name.to_string(),
            role_id: role.id,
            role,
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        user
    }

    /// Stores a credential with an already computed hash.
    pub fn insert_credential(&self, user_id: i32, login: &str, password_hash: &str) -> Credential {
        let mut t = self.lock();
        let now = Utc::now();
        let credential = Credential {
            id: t.credentials.len() as i32 + 1,
            user_id,
            login: login.to_string(),
            password: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        t.credentials.push(credential.clone());
        credential
    }

    pub fn insert_article(&self, author_id: i32, title: &str) -> Article {
        let mut t = self.lock();
        let now = Utc::now();
        let article = Article {
            id: t.articles.iter().map(|a| a.id).max().unwrap_or(0) + 1,
            title: title.to_string(),
            content: "Some article content".to_string(),
            author_id,
            author_name: None,
            rating_avg: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        };
        t.articles.push(article.clone());
        article
    }

    pub fn insert_comment(&self, article_id: i32, user_id: i32, rating: i32) -> Comment {
        let mut t = self.lock();
        let now = Utc::now();
        let comment = Comment {
            id: t.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            article_id,
            user_id,
            text: "Nice one".to_string(),
            rating,
            created_at: now,
            updated_at: now,
        };
        t.comments.push(comment.clone());
        comment
    }

    pub fn article_count(&self) -> usize {
        self.lock().articles.len()
    }

    pub fn comment_count(&self) -> usize {
        self.lock().comments.len()
    }

    pub fn credential_for(&self, user_id: i32) -> Option<Credential> {
        self.lock().credentials.iter().find(|c| c.user_id == user_id).cloned()
    }
}

fn window<T: Clone>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    rows.skip(page.offset as usize).take(page.limit as usize).collect()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut t = self.lock();
        let created = t.new_user(user)?;
        t.users.push(created.clone());
        Ok(created)
    }

    async fn create_with_credential(&self, user: NewUser, credential: NewLogin) -> Result<User, DatabaseError> {
        // One lock for both rows, nothing is written unless both fit
        let mut t = self.lock();
        let created = t.new_user(user)?;
        if t.credentials.iter().any(|c| c.login == credential.login) {
            return Err(DatabaseError::Conflict("auth_credentials_login_key".to_string()));
        }
        let now = Utc::now();
        let stored = Credential {
            id: t.credentials.len() as i32 + 1,
            user_id: created.id,
            login: credential.login,
            password: credential.password_hash,
            created_at: now,
            updated_at: now,
        };
        t.users.push(created.clone());
        t.credentials.push(stored);
        Ok(created)
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, DatabaseError> {
        Ok(window(self.lock().users.iter().rev().cloned(), page))
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<RoleRecord>, DatabaseError> {
        Ok(self.lock().roles.iter().find(|r| r.id == id).cloned())
    }

    async fn get_by_name(&self, role: Role) -> Result<Option<RoleRecord>, DatabaseError> {
        Ok(self.lock().roles.iter().find(|r| r.name == role).cloned())
    }

    async fn list(&self) -> Result<Vec<RoleRecord>, DatabaseError> {
        Ok(self.lock().roles.clone())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get_by_login(&self, login: &str) -> Result<Option<Credential>, DatabaseError> {
        Ok(self.lock().credentials.iter().find(|c| c.login == login).cloned())
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Option<Credential>, DatabaseError> {
        Ok(self.lock().credentials.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn create(&self, credential: NewCredential) -> Result<Credential, DatabaseError> {
        {
            let t = self.lock();
            if t.credentials.iter().any(|c| c.login == credential.login) {
                return Err(DatabaseError::Conflict("auth_credentials_login_key".to_string()));
            }
            if t.credentials.iter().any(|c| c.user_id == credential.user_id) {
                return Err(DatabaseError::Conflict("auth_credentials_user_id_key".to_string()));
            }
        }
        Ok(self.insert_credential(credential.user_id, &credential.login, &credential.password_hash))
    }

    async fn update(&self, user_id: i32, changes: CredentialChanges) -> Result<Option<Credential>, DatabaseError> {
        let mut t = self.lock();
        if let Some(login) = &changes.login {
            if t.credentials.iter().any(|c| &c.login == login && c.user_id != user_id) {
                return Err(DatabaseError::Conflict("auth_credentials_login_key".to_string()));
            }
        }
        let Some(credential) = t.credentials.iter_mut().find(|c| c.user_id == user_id) else {
            return Ok(None);
        };
        if let Some(login) = changes.login {
            credential.login = login;
        }
        if let Some(hash) = changes.password_hash {
            credential.password = hash;
        }
        credential.updated_at = Utc::now();
        Ok(Some(credential.clone()))
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn create(&self, article: NewArticle) -> Result<Article, DatabaseError> {
        if !self.lock().users.iter().any(|u| u.id == article.author_id) {
            return Err(DatabaseError::InvalidReference("articles_author_id_fkey".to_string()));
        }
        let created = self.insert_article(article.author_id, &article.title);
        let mut t = self.lock();
        let stored = t
            .articles
            .iter_mut()
            .find(|a| a.id == created.id)
            .ok_or_else(|| DatabaseError::Conflict("articles_pkey".to_string()))?;
        stored.content = article.content;
        let mut created = stored.clone();
        created.author_name = t.users.iter().find(|u| u.id == created.author_id).map(|u| u.name.clone());
        Ok(created)
    }

    async fn get(&self, id: i32) -> Result<Option<Article>, DatabaseError> {
        let t = self.lock();
        Ok(t.articles.iter().find(|a| a.id == id).map(|a| {
            let mut article = a.clone();
            article.author_name = t.users.iter().find(|u| u.id == a.author_id).map(|u| u.name.clone());
            article
        }))
    }

    async fn update(&self, id: i32, changes: ArticleChanges) -> Result<Option<Article>, DatabaseError> {
        let mut t = self.lock();
        let Some(article) = t.articles.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            article.title = title;
        }
        if let Some(content) = changes.content {
            article.content = content;
        }
        article.updated_at = Utc::now();
        let mut updated = article.clone();
        updated.author_name = t.users.iter().find(|u| u.id == updated.author_id).map(|u| u.name.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut t = self.lock();
        let before = t.articles.len();
        t.articles.retain(|a| a.id != id);
        let deleted = t.articles.len() < before;
        if deleted {
            t.comments.retain(|c| c.article_id != id);
        }
        Ok(deleted)
    }

    async fn list(&self, page: Page) -> Result<Vec<Article>, DatabaseError> {
        let t = self.lock();
        let rows = t.articles.iter().rev().map(|a| {
            let mut article = a.clone();
            article.author_name = t.users.iter().find(|u| u.id == a.author_id).map(|u| u.name.clone());
            article
        });
        Ok(window(rows, page))
    }

    async fn list_by_author(&self, author_id: i32, page: Page) -> Result<Vec<Article>, DatabaseError> {
        let t = self.lock();
        Ok(window(t.articles.iter().rev().filter(|a| a.author_id == author_id).cloned(), page))
    }

    async fn count_by_author(&self, author_id: i32) -> Result<i64, DatabaseError> {
        Ok(self.lock().articles.iter().filter(|a| a.author_id == author_id).count() as i64)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        if !self.lock().articles.iter().any(|a| a.id == comment.article_id) {
            return Err(DatabaseError::InvalidReference("comments_article_id_fkey".to_string()));
        }
        let created = self.insert_comment(comment.article_id, comment.user_id, comment.rating);
        let mut t = self.lock();
        let stored = t
            .comments
            .iter_mut()
            .find(|c| c.id == created.id)
            .ok_or_else(|| DatabaseError::Conflict("comments_pkey".to_string()))?;
        stored.text = comment.text;
        Ok(stored.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Comment>, DatabaseError> {
        Ok(self.lock().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_article(&self, article_id: i32, page: Page) -> Result<Vec<Comment>, DatabaseError> {
        let t = self.lock();
        Ok(window(t.comments.iter().rev().filter(|c| c.article_id == article_id).cloned(), page))
    }

    async fn update(&self, id: i64, changes: CommentChanges) -> Result<Option<Comment>, DatabaseError> {
        let mut t = self.lock();
        let Some(comment) = t.comments.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(text) = changes.text {
            comment.text = text;
        }
        if let Some(rating) = changes.rating {
            comment.rating = rating;
        }
        comment.updated_at = Utc::now();
        Ok(Some(comment.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut t = self.lock();
        let before = t.comments.len();
        t.comments.retain(|c| c.id != id);
        Ok(t.comments.len() < before)
    }

    async fn rating_stats(&self, article_id: i32) -> Result<RatingStats, DatabaseError> {
        let t = self.lock();
        let ratings: Vec<i32> = t
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .map(|c| c.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(RatingStats::default());
        }
        let sum: i32 = ratings.iter().sum();
        Ok(RatingStats {
            average: sum as f64 / ratings.len() as f64,
            count: ratings.len() as i64,
        })
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Application state over a fresh in-memory store, with cheap bcrypt.
pub fn app_state(store: &Arc<MemoryStore>) -> AppState {
    AppState::new(&security_config(), store.stores()).unwrap()
}

/// Hash for `password` at the test cost.
pub async fn hash(password: &str) -> String {
    crate::auth::PasswordHasher::new(4).unwrap().hash(password).await.unwrap()
}
