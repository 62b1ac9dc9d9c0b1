//! ixe-core - Core library for ex-informix
//!
//! This crate provides the job configuration read from `config.yml`, the
//! strongly-typed output table identifier and the fixed output file layout
//! shared by the database and extraction crates.

pub mod config;
pub mod error;
pub mod paths;
pub(crate) mod serde_helpers;
pub mod table_id;

pub use config::{ConnectionParameters, Driver, JobConfig, Parameters, PrimaryKey, QuerySpec};
pub use error::{CoreError, CoreResult};
pub use paths::OutputPaths;
pub use table_id::TableId;
