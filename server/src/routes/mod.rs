//! Route definitions for the Chirpy API

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::handlers::*;

/// Build the full API router over `state`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/healthz", get(health_check))
        .merge(user_routes())
        .merge(auth_routes())
        .merge(chirp_routes())
        .merge(admin_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// User routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/api/users", post(create_user).put(update_user))
}

// Session and refresh token routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
}

// Admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/reset", post(reset_users))
}

// Chirp routes
pub fn chirp_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chirps", get(list_chirps).post(create_chirp))
        .route("/api/chirps/:id", get(get_chirp).delete(delete_chirp))
}
