//! Middleware and extractors for the Chirpy API

mod auth;
mod json;

pub use auth::AuthenticatedUser;
pub use json::JsonBody;
