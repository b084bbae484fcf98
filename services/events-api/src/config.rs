//! Configuration for the Events API service.

use showcase_access::AccessConfig;
use std::time::Duration;

/// Events API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Maximum pooled database connections
    pub db_max_connections: u32,

    /// Apply migrations on startup
    pub run_migrations: bool,

    /// Access core configuration
    pub access: AccessConfig,

    /// Request timeout
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("DB_MAX_CONNECTIONS"))?;

        let run_migrations = parse_bool("RUN_MIGRATIONS", true)?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Identity provider
        let token_secret =
            std::env::var("TOKEN_SECRET").map_err(|_| ConfigError::Missing("TOKEN_SECRET"))?;
        let token_issuer =
            std::env::var("TOKEN_ISSUER").map_err(|_| ConfigError::Missing("TOKEN_ISSUER"))?;
        let token_audience =
            std::env::var("TOKEN_AUDIENCE").unwrap_or_else(|_| "showcase".to_string());

        // Tier policy
        let self_service_tier_changes = parse_bool("SELF_SERVICE_TIER_CHANGES", false)?;

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        // Metrics
        let metrics_enabled = parse_bool("METRICS_ENABLED", true)?;

        let access = AccessConfig::try_new(token_secret, token_issuer, token_audience)
            .map_err(|e| ConfigError::AccessConfig(e.to_string()))?
            .with_self_service_tier_changes(self_service_tier_changes);

        Ok(Self {
            http_port,
            database_url,
            db_max_connections,
            run_migrations,
            access,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

fn parse_bool(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid(var)),
        Err(_) => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Access config error: {0}")]
    AccessConfig(String),
}
