//! Authentication module for Chirpy
//!
//! - Password hashing with bcrypt
//! - JWT session token generation and validation
//! - Opaque refresh tokens backed by the store
//! - `Authorization` header parsing and the request auth gate

mod error;
mod gate;
mod header;
mod jwt;
mod password;
mod refresh;
mod service;

pub use error::{AuthError, AuthResult};
pub use gate::authenticate;
pub use header::{extract_api_key, extract_bearer};
pub use jwt::{issue_session_token, make_jwt, validate_jwt, Claims, ISSUER, SESSION_TOKEN_TTL_SECONDS};
pub use password::{hash_password, verify_password, BCRYPT_COST};
pub use refresh::{
    issue_refresh_token, mint_refresh_token, redeem_refresh_token, revoke_refresh_token,
    REFRESH_TOKEN_TTL_DAYS,
};
pub use service::{AuthService, LoginOutcome};
