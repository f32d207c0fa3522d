use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ChirpStore, RefreshTokenStore, StorageError, StorageResult, UserStore};
use crate::models::{Chirp, RefreshTokenRecord, User};

/// In-process store, used when no database is configured and by the tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    /// token -> record
    refresh_tokens: RwLock<HashMap<String, RefreshTokenRecord>>,
    chirps: RwLock<Vec<Chirp>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a refresh token record, e.g. to age it in tests
    pub async fn put_refresh_token(&self, record: RefreshTokenRecord) {
        self.refresh_tokens
            .write()
            .await
            .insert(record.token.clone(), record);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> StorageResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(StorageError::DuplicateEmail(email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StorageResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> StorageResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email && u.id != id) {
            return Err(StorageError::DuplicateEmail(email.to_string()));
        }

        let user = users
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("user {id}")))?;
        user.email = email.to_string();
        user.hashed_password = hashed_password.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn reset_users(&self) -> StorageResult<()> {
        let mut users = self.users.write().await;
        let mut tokens = self.refresh_tokens.write().await;
        let mut chirps = self.chirps.write().await;
        users.clear();
        tokens.clear();
        chirps.clear();
        Ok(())
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> StorageResult<RefreshTokenRecord> {
        let now = Utc::now();
        let record = RefreshTokenRecord {
            token: token.to_string(),
            user_id,
            expires_at,
            revoked_at: None,
            created_at: now,
            updated_at: now,
        };
        self.put_refresh_token(record.clone()).await;
        Ok(record)
    }

    async fn find_refresh_token(&self, token: &str) -> StorageResult<Option<RefreshTokenRecord>> {
        Ok(self.refresh_tokens.read().await.get(token).cloned())
    }

    async fn revoke_refresh_token(&self, token: &str) -> StorageResult<()> {
        let mut tokens = self.refresh_tokens.write().await;
        if let Some(record) = tokens.get_mut(token) {
            if record.revoked_at.is_none() {
                let now = Utc::now();
                record.revoked_at = Some(now);
                record.updated_at = now;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ChirpStore for MemoryStore {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> StorageResult<Chirp> {
        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            body: body.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.chirps.write().await.push(chirp.clone());
        Ok(chirp)
    }

    async fn list_chirps(&self) -> StorageResult<Vec<Chirp>> {
        Ok(self.chirps.read().await.clone())
    }

    async fn find_chirp(&self, id: Uuid) -> StorageResult<Option<Chirp>> {
        let chirps = self.chirps.read().await;
        Ok(chirps.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_chirp(&self, id: Uuid) -> StorageResult<bool> {
        let mut chirps = self.chirps.write().await;
        let before = chirps.len();
        chirps.retain(|c| c.id != id);
        Ok(chirps.len() < before)
    }
}
