use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{ChirpStore, RefreshTokenStore, StorageError, StorageResult, UserStore};
use crate::models::{Chirp, RefreshTokenRecord, User};

/// PostgreSQL implementation of every store trait
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize database schema
    pub async fn initialize(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                hashed_password TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS refresh_tokens (
                token TEXT PRIMARY KEY,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expires_at TIMESTAMPTZ NOT NULL,
                revoked_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chirps (
                id UUID PRIMARY KEY,
                body TEXT NOT NULL,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn map_unique_violation(e: sqlx::Error, email: &str) -> StorageError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return StorageError::DuplicateEmail(email.to_string());
        }
    }
    StorageError::Database(e)
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> StorageResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, hashed_password, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, email, hashed_password, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, email))
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, hashed_password, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, hashed_password, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> StorageResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, hashed_password = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, hashed_password, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, email))?
        .ok_or_else(|| StorageError::NotFound(format!("user {id}")))
    }

    async fn reset_users(&self) -> StorageResult<()> {
        // refresh_tokens and chirps cascade
        sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenStore for PgStore {
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> StorageResult<RefreshTokenRecord> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at, revoked_at, created_at, updated_at)
            VALUES ($1, $2, $3, NULL, NOW(), NOW())
            RETURNING token, user_id, expires_at, revoked_at, created_at, updated_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_refresh_token(&self, token: &str) -> StorageResult<Option<RefreshTokenRecord>> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            SELECT token, user_id, expires_at, revoked_at, created_at, updated_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn revoke_refresh_token(&self, token: &str) -> StorageResult<()> {
        sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ChirpStore for PgStore {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> StorageResult<Chirp> {
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            INSERT INTO chirps (id, body, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, body, user_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(chirp)
    }

    async fn list_chirps(&self) -> StorageResult<Vec<Chirp>> {
        let chirps = sqlx::query_as::<_, Chirp>(
            "SELECT id, body, user_id, created_at, updated_at FROM chirps ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(chirps)
    }

    async fn find_chirp(&self, id: Uuid) -> StorageResult<Option<Chirp>> {
        let chirp = sqlx::query_as::<_, Chirp>(
            "SELECT id, body, user_id, created_at, updated_at FROM chirps WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(chirp)
    }

    async fn delete_chirp(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
