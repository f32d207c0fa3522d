//! Error types for the auth core

use thiserror::Error;

use crate::store::StorageError;

/// Every failure the auth core can report.
///
/// Clients never see these directly: `ApiError` collapses them into a
/// handful of opaque responses.
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Passwords ---
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("password does not match")]
    Mismatch,

    // --- Session tokens ---
    #[error("failed to sign session token: {0}")]
    Signing(String),

    #[error("invalid session token")]
    InvalidToken,

    #[error("session token subject is not a user id")]
    MalformedSubject,

    // --- Authorization header ---
    #[error("no Authorization header found")]
    MissingHeader,

    #[error("malformed Authorization header")]
    MalformedHeader,

    // --- Refresh tokens ---
    #[error("refresh token not found")]
    RefreshNotFound,

    #[error("refresh token expired")]
    RefreshExpired,

    #[error("refresh token revoked")]
    RefreshRevoked,

    // --- Gate ---
    #[error("unauthorized")]
    Unauthorized,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result alias for the auth core
pub type AuthResult<T> = Result<T, AuthError>;
