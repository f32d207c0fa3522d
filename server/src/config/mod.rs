//! Server configuration loaded from environment variables

use std::env;
use std::fmt;

/// Server configuration
#[derive(Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Bind address
    pub bind_addr: String,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
    /// Deployment platform; only `dev` enables the admin reset
    pub platform: String,
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort)?,
            None => 8080,
        };

        Ok(Self {
            port,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            database_url: lookup("DB_URL").filter(|url| !url.trim().is_empty()),
            jwt_secret,
            cors_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            platform: lookup("PLATFORM").unwrap_or_else(|| "prod".to_string()),
        })
    }

    /// Get the full bind address (addr:port)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("jwt_secret", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .field("platform", &self.platform)
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
