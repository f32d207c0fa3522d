//! `Authorization` header parsing

use axum::http::{header, HeaderMap};

use super::error::{AuthError, AuthResult};

const BEARER_SCHEME: &str = "Bearer";
const API_KEY_SCHEME: &str = "ApiKey";

/// Extract the token from `Authorization: Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> AuthResult<String> {
    extract_credential(headers, BEARER_SCHEME)
}

/// Extract the key from `Authorization: ApiKey <key>`.
///
/// Comparing the key with the expected secret is up to the caller.
pub fn extract_api_key(headers: &HeaderMap) -> AuthResult<String> {
    extract_credential(headers, API_KEY_SCHEME)
}

/// Exactly two space separated parts; the scheme matches ignoring ASCII case.
fn extract_credential(headers: &HeaderMap, scheme: &str) -> AuthResult<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    if value.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(found), Some(credential), None)
            if found.eq_ignore_ascii_case(scheme) && !credential.is_empty() =>
        {
            Ok(credential.to_string())
        }
        _ => Err(AuthError::MalformedHeader),
    }
}
