use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::models::{NewLogin, NewUser, User};
use super::store::{Page, UserStore};
use super::DatabaseError;

const SELECT_USER: &str = "
    SELECT u.id, u.email, u.name, u.role_id, u.created_at, u.updated_at,
           r.name AS role_name, r.description AS role_description,
           r.created_at AS role_created_at, r.updated_at AS role_updated_at
    FROM users u
    JOIN roles r ON r.id = u.role_id";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE u.email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        insert_user(&mut *conn, &user).await
    }

    async fn create_with_credential(&self, user: NewUser, credential: NewLogin) -> Result<User, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let created = insert_user(&mut *tx, &user).await?;

        sqlx::query("INSERT INTO auth_credentials (user_id, login, password) VALUES ($1, $2, $3)")
            .bind(created.id)
            .bind(&credential.login)
            .bind(&credential.password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "{SELECT_USER} ORDER BY u.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}

async fn insert_user(conn: &mut PgConnection, user: &NewUser) -> Result<User, DatabaseError> {
    // Insert then re-read through the join so the role comes back resolved
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO users (email, name, role_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&user.email)
    .bind(&user.name)
    .bind(user.role_id)
    .fetch_one(&mut *conn)
    .await?;

    let created = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE u.id = $1"))
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(created)
}
