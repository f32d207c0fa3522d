//! Auth service for Chirpy
//!
//! Ties the hashing, token and refresh-token pieces to the stores for the
//! register / login / refresh / revoke flows.

use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};
use super::gate::authenticate;
use super::jwt::issue_session_token;
use super::password::{hash_password, verify_password};
use super::refresh::{issue_refresh_token, redeem_refresh_token, revoke_refresh_token};
use crate::models::User;
use crate::store::{RefreshTokenStore, UserStore};

/// Result of a successful login
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    /// Session token, valid for one hour
    pub token: String,
    pub refresh_token: String,
}

/// Central entry point for every authentication flow
pub struct AuthService {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Register a new user
    pub async fn register(&self, email: &str, password: &str) -> AuthResult<User> {
        let hashed_password = hash_blocking(password).await?;
        let user = self.users.create_user(email, &hashed_password).await?;

        info!(user_id = %user.id, "new user registered");
        Ok(user)
    }

    /// Check credentials and hand out a session token plus a refresh token.
    ///
    /// An unknown email and a wrong password are both `Mismatch`.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginOutcome> {
        let Some(user) = self.users.find_user_by_email(email).await? else {
            warn!("login attempt for unknown email");
            return Err(AuthError::Mismatch);
        };

        if let Err(e) = verify_blocking(password, &user.hashed_password).await {
            warn!(user_id = %user.id, "failed login attempt");
            return Err(e);
        }

        let token = issue_session_token(user.id, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(self.refresh_tokens.as_ref(), user.id).await?;

        info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome {
            user,
            token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new session token
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<String> {
        let user_id = redeem_refresh_token(self.refresh_tokens.as_ref(), refresh_token).await?;
        issue_session_token(user_id, &self.jwt_secret)
    }

    /// Revoke a refresh token (idempotent)
    pub async fn revoke(&self, refresh_token: &str) {
        revoke_refresh_token(self.refresh_tokens.as_ref(), refresh_token).await;
        info!("refresh token revoked");
    }

    /// Replace the email and password of an authenticated user
    pub async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> AuthResult<User> {
        if self.users.find_user_by_id(user_id).await?.is_none() {
            warn!(user_id = %user_id, "valid token for a user that no longer exists");
            return Err(AuthError::Unauthorized);
        }

        let hashed_password = hash_blocking(password).await?;
        let user = self
            .users
            .update_user(user_id, email, &hashed_password)
            .await?;

        info!(user_id = %user.id, "credentials updated");
        Ok(user)
    }

    /// Run the auth gate against this service's signing secret
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<Uuid> {
        authenticate(headers, &self.jwt_secret)
    }
}

// bcrypt runs on the blocking pool.
async fn hash_blocking(password: &str) -> AuthResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

async fn verify_blocking(password: &str, hash: &str) -> AuthResult<()> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|_| AuthError::Mismatch)?
}
