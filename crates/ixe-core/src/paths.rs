//! Output file layout under the data directory

use crate::table_id::TableId;
use std::path::{Path, PathBuf};

/// Directory, relative to the data directory, that receives exported tables
pub const TABLES_DIR: &str = "out/tables";

/// Extension of exported data files
pub const DATA_EXTENSION: &str = "csv";

/// Suffix appended to the data file name for the sidecar manifest
pub const MANIFEST_SUFFIX: &str = ".manifest";

/// The pair of files produced for one output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `out/tables/<table>.csv`
    pub data: PathBuf,

    /// `out/tables/<table>.csv.manifest`
    pub manifest: PathBuf,
}

impl OutputPaths {
    /// Resolve the output files for `table` beneath `data_dir`
    pub fn new(data_dir: &Path, table: &TableId) -> Self {
        let dir = Self::tables_dir(data_dir);
        let data_name = format!("{}.{}", table, DATA_EXTENSION);
        let manifest_name = format!("{}{}", data_name, MANIFEST_SUFFIX);
        Self {
            data: dir.join(data_name),
            manifest: dir.join(manifest_name),
        }
    }

    /// Absolute directory holding every exported table
    pub fn tables_dir(data_dir: &Path) -> PathBuf {
        data_dir.join(TABLES_DIR)
    }
}
