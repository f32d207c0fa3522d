//! Persistence contracts for users, refresh tokens and chirps
//!
//! The auth core only talks to these traits. `PgStore` backs them with
//! PostgreSQL, `MemoryStore` keeps everything in process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Chirp, RefreshTokenRecord, User};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage backend for user identities
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a new user with an already hashed password
    async fn create_user(&self, email: &str, hashed_password: &str) -> StorageResult<User>;

    /// Get user by email
    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Get user by ID
    async fn find_user_by_id(&self, id: Uuid) -> StorageResult<Option<User>>;

    /// Replace a user's email and password hash
    async fn update_user(&self, id: Uuid, email: &str, hashed_password: &str)
        -> StorageResult<User>;

    /// Delete every user along with their refresh tokens and chirps
    async fn reset_users(&self) -> StorageResult<()>;
}

/// Storage backend for refresh token association records
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a freshly minted token for `user_id`
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> StorageResult<RefreshTokenRecord>;

    /// Look up the association record of a token
    async fn find_refresh_token(&self, token: &str) -> StorageResult<Option<RefreshTokenRecord>>;

    /// Mark a token revoked. Unknown and already revoked tokens are left untouched.
    async fn revoke_refresh_token(&self, token: &str) -> StorageResult<()>;
}

/// Storage backend for chirps
#[async_trait]
pub trait ChirpStore: Send + Sync {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> StorageResult<Chirp>;

    /// All chirps, oldest first
    async fn list_chirps(&self) -> StorageResult<Vec<Chirp>>;

    async fn find_chirp(&self, id: Uuid) -> StorageResult<Option<Chirp>>;

    /// Returns `false` if no chirp had this ID
    async fn delete_chirp(&self, id: Uuid) -> StorageResult<bool>;
}
