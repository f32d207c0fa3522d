//! Chirpy Backend Server
//!
//! Serves the Chirpy JSON API: user accounts, logins with session and
//! refresh tokens, and chirps.

use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chirpy_server::app_state::AppState;
use chirpy_server::config::Config;
use chirpy_server::routes::build_router;
use chirpy_server::store::{MemoryStore, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(?config, "configuration loaded");

    let state = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .context("failed to connect to PostgreSQL")?;
            let store = PgStore::new(pool);
            store
                .initialize()
                .await
                .context("failed to initialize database schema")?;
            info!("using PostgreSQL store");
            AppState::from_store(Arc::new(store), &config.jwt_secret)
        }
        None => {
            warn!("DB_URL not set; using in-memory store, data will not survive a restart");
            AppState::from_store(Arc::new(MemoryStore::new()), &config.jwt_secret)
        }
    };

    let state = state.with_platform(config.platform.clone());
    let app = build_router(state).layer(build_cors_layer(&config.cors_origins));

    let addr = config.bind_address();
    info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
}
