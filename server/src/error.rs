//! HTTP error mapping
//!
//! Internal failure reasons are logged here and collapsed into a few opaque
//! client-facing responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::AuthError;
use crate::models::ErrorResponse;
use crate::store::StorageError;

#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    Storage(StorageError),
    Validation(String),
    NotFound(&'static str),
    Forbidden,
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "request body rejected");
        Self::Validation("Could not decode request".to_string())
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Auth(e) => auth_status(e),
            Self::Storage(e) => storage_status(e),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
        }
    }
}

fn auth_status(e: &AuthError) -> (StatusCode, String) {
    match e {
        AuthError::Mismatch => (
            StatusCode::UNAUTHORIZED,
            "Incorrect email or password".to_string(),
        ),
        AuthError::InvalidToken
        | AuthError::MalformedSubject
        | AuthError::MissingHeader
        | AuthError::MalformedHeader
        | AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        AuthError::RefreshNotFound | AuthError::RefreshExpired | AuthError::RefreshRevoked => (
            StatusCode::UNAUTHORIZED,
            "Invalid refresh token".to_string(),
        ),
        AuthError::Hashing(reason) => {
            tracing::error!(%reason, "password hashing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not hash password".to_string(),
            )
        }
        AuthError::Signing(reason) => {
            tracing::error!(%reason, "session token signing failed; check JWT_SECRET");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not create token".to_string(),
            )
        }
        AuthError::Storage(e) => storage_status(e),
    }
}

fn storage_status(e: &StorageError) -> (StatusCode, String) {
    match e {
        StorageError::DuplicateEmail(_) => {
            (StatusCode::CONFLICT, "Email already in use".to_string())
        }
        StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found".to_string()),
        StorageError::Database(err) => {
            tracing::error!(error = %err, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        (status, Json(ErrorResponse { error })).into_response()
    }
}
