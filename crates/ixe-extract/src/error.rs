//! Error types for ixe-extract

use ixe_core::CoreError;
use ixe_db::DbError;
use thiserror::Error;

/// Exit code for a successful run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for data-layer faults (configuration, connection, query)
pub const EXIT_DATA_FAULT: u8 = 1;

/// Exit code for every other fault
pub const EXIT_FAULT: u8 = 2;

/// Extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// X001: Invalid extraction parameter
    #[error("[X001] Invalid configuration: {0}")]
    Configuration(String),

    /// X002: Query failed on every allowed attempt
    #[error("[X002] Query '{query}' failed after {attempts} attempt(s). Reason '{reason}'")]
    DbExecution {
        query: String,
        attempts: u32,
        reason: String,
        #[source]
        source: DbError,
    },

    /// X003: Output file could not be written
    #[error("[X003] Failed to write '{path}': {source}")]
    Output {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// X004: Manifest could not be serialized
    #[error("[X004] Failed to serialize manifest: {0}")]
    ManifestSerialize(#[from] serde_yaml::Error),

    /// Database error outside a query attempt
    #[error(transparent)]
    Db(#[from] DbError),

    /// Job configuration error
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ExtractError {
    /// Build an [`ExtractError::Output`] for `path`
    pub fn output(
        path: &std::path::Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ExtractError::Output {
            path: path.display().to_string(),
            source: source.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// Configuration, connection and query failures are data-layer faults;
    /// a missing driver, unreadable config.yml or local I/O failure is not.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtractError::Configuration(_) | ExtractError::DbExecution { .. } => EXIT_DATA_FAULT,
            ExtractError::Db(db) => match db {
                DbError::Configuration(_)
                | DbError::ConnectionError(_)
                | DbError::ExecutionError(_)
                | DbError::FetchError(_) => EXIT_DATA_FAULT,
                DbError::DriverUnavailable { .. } | DbError::Sink(_) => EXIT_FAULT,
            },
            ExtractError::Core(_)
            | ExtractError::Output { .. }
            | ExtractError::ManifestSerialize(_) => EXIT_FAULT,
        }
    }
}

/// Result type alias for ExtractError
pub type ExtractResult<T> = Result<T, ExtractError>;
