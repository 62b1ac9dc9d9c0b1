//! ixe-db - Database layer for ex-informix
//!
//! This crate provides the `Database` and `RowSink` traits used to stream a
//! query result row by row, the connector that validates connection
//! parameters and opens the single connection a run uses, and the backends:
//! Informix over ODBC (feature `odbc`) and embedded DuckDB.

pub mod connector;
pub mod duckdb;
pub mod error;
#[cfg(feature = "odbc")]
pub mod informix;
pub mod traits;

pub use connector::{classify_open_error, connect, ConnectionDescriptor};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult, SinkError};
#[cfg(feature = "odbc")]
pub use informix::InformixBackend;
pub use traits::{Database, Row, RowSink};
