//! Error types.

use thiserror::Error;

/// A query that cannot be rendered to valid SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The field set has no fields, which would render `SELECT FROM`.
    #[error("SELECT from `{table}` has no fields")]
    EmptyFieldSet {
        /// The source table.
        table: String,
    },

    /// An OFFSET was set without a LIMIT.
    #[error("OFFSET requires a LIMIT")]
    OffsetWithoutLimit,

    /// LIMIT was set to zero.
    #[error("LIMIT must be positive")]
    ZeroLimit,
}

/// Result type alias for query construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of [`Query::run`](crate::Query::run).
///
/// Connection failures are passed through untouched.
#[derive(Debug, Error)]
pub enum RunError<E: std::error::Error + 'static> {
    /// The query was rejected before submission.
    #[error("invalid query: {0}")]
    Build(#[from] Error),

    /// The connection failed to execute the query.
    #[error(transparent)]
    Connection(E),
}

impl<E: std::error::Error + 'static> RunError<E> {
    /// Returns the connection error, if that is what failed.
    #[must_use]
    pub const fn connection(&self) -> Option<&E> {
        match self {
            Self::Connection(e) => Some(e),
            Self::Build(_) => None,
        }
    }
}
