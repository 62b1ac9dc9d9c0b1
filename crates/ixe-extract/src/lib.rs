//! ixe-extract - Query export for ex-informix
//!
//! Executes configured queries one at a time with bounded retry and
//! exponential backoff, streams each result set into a CSV file under
//! `out/tables/` and writes the sidecar manifest describing how the file
//! is loaded downstream.

pub mod error;
pub mod job;
pub mod manifest;
pub mod retry;
pub mod runner;
pub mod sink;

pub use error::{ExtractError, ExtractResult};
pub use job::run_job;
pub use manifest::Manifest;
pub use retry::{backoff_delay, Pause, RetryPolicy, ThreadSleep};
pub use runner::{ExportOutcome, QueryRunner};
pub use sink::{CsvSink, ExportResult};
