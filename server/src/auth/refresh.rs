//! Refresh token lifecycle
//!
//! A refresh token is 256 random bits, hex encoded. It carries no identity
//! of its own; the owning user, the expiry and the revocation mark live in
//! the store's association record. Redeeming does not consume the token.

use chrono::{Duration, Utc};
use rand::RngCore;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};
use crate::store::RefreshTokenStore;

/// Default refresh token lifetime
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Generate a new refresh token (64 hex characters)
pub fn mint_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Mint a token for `user_id` and record it with the default expiry.
pub async fn issue_refresh_token(
    store: &dyn RefreshTokenStore,
    user_id: Uuid,
) -> AuthResult<String> {
    let token = mint_refresh_token();
    let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
    store
        .create_refresh_token(&token, user_id, expires_at)
        .await?;
    Ok(token)
}

/// Resolve a refresh token to its user.
pub async fn redeem_refresh_token(store: &dyn RefreshTokenStore, token: &str) -> AuthResult<Uuid> {
    let record = store
        .find_refresh_token(token)
        .await?
        .ok_or(AuthError::RefreshNotFound)?;

    if record.revoked_at.is_some() {
        debug!(user_id = %record.user_id, "revoked refresh token presented");
        return Err(AuthError::RefreshRevoked);
    }
    if Utc::now() > record.expires_at {
        debug!(user_id = %record.user_id, "expired refresh token presented");
        return Err(AuthError::RefreshExpired);
    }

    Ok(record.user_id)
}

/// Revoke a refresh token. Never fails; store errors are logged.
pub async fn revoke_refresh_token(store: &dyn RefreshTokenStore, token: &str) {
    if let Err(e) = store.revoke_refresh_token(token).await {
        warn!(error = %e, "failed to revoke refresh token");
    }
}
