//! Password hashing with bcrypt

use tracing::debug;

use super::error::{AuthError, AuthResult};

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

/// bcrypt only looks at this many bytes of input
const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with a random salt.
///
/// Passwords longer than 72 bytes are rejected instead of being truncated.
pub fn hash_password(password: &str) -> AuthResult<String> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::Hashing(format!(
            "password exceeds {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    bcrypt::hash(password, BCRYPT_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// A wrong password and an unreadable stored hash both come back as `Mismatch`.
/// Inputs over 72 bytes can never have been hashed, so they never match.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<()> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::Mismatch);
    }

    match bcrypt::verify(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::Mismatch),
        Err(e) => {
            debug!(error = %e, "stored password hash could not be checked");
            Err(AuthError::Mismatch)
        }
    }
}
