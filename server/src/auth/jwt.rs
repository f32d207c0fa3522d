//! Session tokens: HS256 JWTs asserting a user id.
//!
//! Tokens are stateless. Validity depends only on the signature, the issuer
//! and the expiry at the time of validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};

/// Value of the `iss` claim on every token we sign
pub const ISSUER: &str = "chirpy";

/// Lifetime of a session token: 1 hour
pub const SESSION_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    /// User id, hyphenated
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token for `user_id` that expires after `expires_in`.
pub fn make_jwt(user_id: Uuid, secret: &str, expires_in: Duration) -> AuthResult<String> {
    if secret.is_empty() {
        error!("refusing to sign a session token with an empty secret");
        return Err(AuthError::Signing("secret must be non-empty".to_string()));
    }

    let now = Utc::now();
    let claims = Claims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, "failed to sign session token");
        AuthError::Signing(e.to_string())
    })
}

/// Sign a session token with the fixed 1 hour lifetime.
pub fn issue_session_token(user_id: Uuid, secret: &str) -> AuthResult<String> {
    make_jwt(user_id, secret, Duration::seconds(SESSION_TOKEN_TTL_SECONDS))
}

/// Verify a session token and return the user id it was issued for.
///
/// Bad signatures, expired tokens and garbage input are all `InvalidToken`.
pub fn validate_jwt(token: &str, secret: &str) -> AuthResult<Uuid> {
    if secret.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!(error = %e, "session token rejected");
        AuthError::InvalidToken
    })?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::MalformedSubject)
}
