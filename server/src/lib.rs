//! Chirpy Backend Library
//!
//! Authentication core (password hashing, session tokens, refresh tokens,
//! header extraction and the auth gate) plus the HTTP surface built on it.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;
