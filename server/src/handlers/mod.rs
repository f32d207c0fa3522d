//! HTTP handlers for the Chirpy API

mod admin;
mod auth;
mod chirp;
mod health;
mod user;

pub use admin::reset_users;
pub use auth::{login, refresh, revoke};
pub use chirp::{create_chirp, delete_chirp, get_chirp, list_chirps};
pub use health::health_check;
pub use user::{create_user, update_user};
