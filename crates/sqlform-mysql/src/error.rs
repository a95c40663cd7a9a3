//! Error types for the MySQL connection.

use thiserror::Error;

/// Errors raised while connecting to or querying MySQL.
#[derive(Debug, Error)]
pub enum MySqlError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The configuration cannot produce a pool.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for MySQL operations.
pub type Result<T> = std::result::Result<T, MySqlError>;
