use axum::http::HeaderMap;
use tracing::debug;
use uuid::Uuid;

use super::error::{AuthError, AuthResult};
use super::header::extract_bearer;
use super::jwt::validate_jwt;

/// Authenticate a request from its bearer session token.
///
/// Every failure, whatever the cause, is reported as `Unauthorized`.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> AuthResult<Uuid> {
    extract_bearer(headers)
        .and_then(|token| validate_jwt(&token, secret))
        .map_err(|e| {
            debug!(reason = %e, "request failed authentication");
            AuthError::Unauthorized
        })
}
