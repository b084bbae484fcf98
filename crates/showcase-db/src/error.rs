//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failure
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// A stored tier value outside the fixed tier set
    #[error("invalid tier in store: {0}")]
    InvalidTier(String),
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
