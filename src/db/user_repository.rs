use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::UserRow;

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a new user and return the full user record
    pub async fn create(
        pool: &Pool<Postgres>,
        name: &str,
        email: &str,
        password_hash: &str,
        image_url: &str,
        role: &str,
    ) -> Result<UserRow, sqlx::Error> {
        debug!("Creating user: email={}, role={}", email, role);

        sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash, image_url, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, image_url, role, resume_url, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(image_url)
        .bind(role)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_email(
        pool: &Pool<Postgres>,
        email: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, image_url, role, resume_url, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &Pool<Postgres>,
        id: i32,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, image_url, role, resume_url, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Store the durable resume URL on an existing user
    pub async fn set_resume(
        pool: &Pool<Postgres>,
        user_id: i32,
        resume_url: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        debug!("Storing resume for user id={}", user_id);

        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET resume_url = $2
            WHERE id = $1
            RETURNING id, name, email, password_hash, image_url, role, resume_url, created_at
            "#,
        )
        .bind(user_id)
        .bind(resume_url)
        .fetch_optional(pool)
        .await
    }
}
