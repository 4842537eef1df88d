//! Centralized configuration (environment variables + defaults).
//!
//! `.env` is loaded by the binaries before any of these are read.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable '{0}'")]
    Missing(&'static str),

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Listening port (`PORT`, default 5000).
pub fn port() -> Result<u16, ConfigError> {
    match std::env::var("PORT") {
        Ok(v) => v.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
            name: "PORT",
            reason: e.to_string(),
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// The single browser origin allowed to call the API (`FRONTEND_URL`).
pub fn frontend_url() -> Option<String> {
    std::env::var("FRONTEND_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Database URL must be provided (no default).
pub fn database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
