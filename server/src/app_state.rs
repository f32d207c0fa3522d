//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;
use crate::store::{ChirpStore, RefreshTokenStore, UserStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub users: Arc<dyn UserStore>,
    pub chirps: Arc<dyn ChirpStore>,
    /// Deployment platform, `prod` unless configured otherwise
    pub platform: String,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        users: Arc<dyn UserStore>,
        chirps: Arc<dyn ChirpStore>,
    ) -> Self {
        Self {
            auth_service,
            users,
            chirps,
            platform: "prod".to_string(),
        }
    }

    /// Build the state from one store backing every table
    pub fn from_store<S>(store: Arc<S>, jwt_secret: &str) -> Self
    where
        S: UserStore + RefreshTokenStore + ChirpStore + 'static,
    {
        let auth_service = AuthService::new(store.clone(), store.clone(), jwt_secret);
        Self::new(Arc::new(auth_service), store.clone(), store)
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Development deployments allow destructive admin endpoints
    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ChirpStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chirps.clone()
    }
}
