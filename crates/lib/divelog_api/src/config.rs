//! API server configuration.

use thiserror::Error;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Configuration for the API server. Read-only after startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Allowed CORS origin for the web app.
    pub webapp_url: String,
    /// JWT signing secret. Required; there is no fallback.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_ttl_secs: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_ttl_secs: i64,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                 | Default                               |
    /// |--------------------------|---------------------------------------|
    /// | `BIND_ADDR`              | `127.0.0.1:8080`                      |
    /// | `DATABASE_URL`           | `postgres://localhost:5432/divelog`   |
    /// | `WEBAPP_URL`             | `http://localhost:8081`               |
    /// | `JWT_SECRET`             | none — startup fails without it       |
    /// | `JWT_EXPIRATION`         | `86400` (seconds)                     |
    /// | `JWT_REFRESH_EXPIRATION` | `604800` (seconds)                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/divelog".into()),
            webapp_url: std::env::var("WEBAPP_URL")
                .unwrap_or_else(|_| "http://localhost:8081".into()),
            jwt_secret,
            access_token_ttl_secs: parse_secs("JWT_EXPIRATION", 86_400)?,
            refresh_token_ttl_secs: parse_secs("JWT_REFRESH_EXPIRATION", 604_800)?,
        })
    }
}

fn parse_secs(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar(name, value)),
        Err(_) => Ok(default),
    }
}
