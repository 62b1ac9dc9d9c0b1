//! Error types for ixe-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Missing or malformed connection parameter (D001)
    #[error("[D001] Invalid connection configuration: {0}")]
    Configuration(String),

    /// Connection could not be opened (D002)
    #[error("[D002] Error connecting to DB: {0}")]
    ConnectionError(String),

    /// The database driver is not installed (D003)
    #[error("[D003] Missing driver for {driver}: {message}")]
    DriverUnavailable { driver: String, message: String },

    /// Query preparation or execution failed (D004)
    #[error("[D004] DB query failed: {0}")]
    ExecutionError(String),

    /// Fetching a row of the result set failed (D005)
    #[error("[D005] DB query fetch failed: {0}")]
    FetchError(String),

    /// The row sink rejected a row (D006)
    #[error("[D006] Row sink failed: {0}")]
    Sink(#[from] SinkError),
}

impl DbError {
    /// Whether the error belongs to a single query attempt and may be
    /// retried by running the whole query again
    pub fn is_attempt_failure(&self) -> bool {
        matches!(self, DbError::ExecutionError(_) | DbError::FetchError(_))
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

/// Failure raised by a [`RowSink`](crate::traits::RowSink) while accepting a row.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct SinkError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl SinkError {
    /// Wrap the underlying sink failure
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The underlying sink failure
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.source
    }
}
