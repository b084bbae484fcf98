//! Access errors

use showcase_types::Tier;
use thiserror::Error;

use crate::Direction;

/// Access control errors
#[derive(Error, Debug)]
pub enum AccessError {
    /// Invalid token (malformed, bad signature, wrong issuer or audience)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Event does not exist
    #[error("event not found")]
    EventNotFound,

    /// Event exists but the user's tier does not grant access
    #[error("event requires {required} tier")]
    EventLocked { required: Tier },

    /// Tier change not permitted for this caller
    #[error("tier change forbidden: {0}")]
    TierChangeForbidden(String),

    /// Already at the end of the tier line
    #[error("no {direction} available from {from} tier")]
    NoTransition { from: Tier, direction: Direction },

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AccessError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken | Self::TokenExpired => 401,
            Self::EventLocked { .. } | Self::TierChangeForbidden(_) => 403,
            Self::EventNotFound => 404,
            Self::NoTransition { .. } => 409,
            Self::Database(_) | Self::Configuration(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::EventLocked { .. } => "EVENT_LOCKED",
            Self::TierChangeForbidden(_) => "TIER_CHANGE_FORBIDDEN",
            Self::NoTransition { .. } => "NO_TRANSITION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<showcase_db::DbError> for AccessError {
    fn from(err: showcase_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
