//! Database and row sink traits

use crate::error::{DbResult, SinkError};

/// One fetched row.
///
/// Column names are in result-set order; values are the textual form of
/// each column, `None` for SQL NULL.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Option<String>],
}

impl<'a> Row<'a> {
    /// Pair column names with values of the same length
    pub fn new(columns: &'a [String], values: &'a [Option<String>]) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Column names in result-set order
    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    /// Column values in result-set order
    pub fn values(&self) -> &'a [Option<String>] {
        self.values
    }
}

/// Receives the rows of a result set while they are being fetched.
pub trait RowSink {
    /// Called once per row, in fetch order
    fn accept(&mut self, row: Row<'_>) -> Result<(), SinkError>;
}

/// Database abstraction trait for ex-informix
///
/// A run opens exactly one connection and uses it from a single thread,
/// one query at a time.
pub trait Database {
    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Execute `sql` and hand every row of its result set to `sink` as it
    /// is fetched, without buffering the result. Returns the number of rows
    /// delivered.
    ///
    /// Execution failures are [`DbError::ExecutionError`], failures while
    /// fetching are [`DbError::FetchError`] (also after some rows were
    /// delivered), and sink failures are passed through as [`DbError::Sink`].
    ///
    /// [`DbError::ExecutionError`]: crate::DbError::ExecutionError
    /// [`DbError::FetchError`]: crate::DbError::FetchError
    /// [`DbError::Sink`]: crate::DbError::Sink
    fn stream_query(&self, sql: &str, sink: &mut dyn RowSink) -> DbResult<u64>;
}

impl<D: Database + ?Sized> Database for Box<D> {
    fn db_type(&self) -> &'static str {
        (**self).db_type()
    }

    fn stream_query(&self, sql: &str, sink: &mut dyn RowSink) -> DbResult<u64> {
        (**self).stream_query(sql, sink)
    }
}
