//! Data models for the Chirpy backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

/// User model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Refresh token association record
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Chirp {
    pub id: Uuid,
    pub body: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for registration, login and credential updates
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(contains = "@")]
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Run the field validators, reporting failures as a 400
    pub fn check(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|_| ApiError::Validation("Email must contain @".to_string()))
    }
}

/// Request DTO for creating a chirp
#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Response DTO for user endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

/// Response DTO for a session token refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
