//! Sidecar manifest describing how an exported table is loaded

use crate::error::{ExtractError, ExtractResult};
use ixe_core::{PrimaryKey, QuerySpec, TableId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of `<table>.csv.manifest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Destination table
    pub destination: TableId,

    /// Incremental-load hint
    pub incremental: bool,

    /// Primary key, `null` when not configured
    pub primary_key: Option<PrimaryKey>,
}

impl Manifest {
    /// Manifest for the output of `spec`
    pub fn for_query(spec: &QuerySpec) -> Self {
        Self {
            destination: spec.output_table.clone(),
            incremental: spec.incremental,
            primary_key: spec.primary_key.clone(),
        }
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ExtractResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the manifest, replacing any existing file
    pub fn save(&self, path: &Path) -> ExtractResult<()> {
        let yaml = self.to_yaml()?;

        let temp_path = path.with_extension(format!("manifest.{}.tmp", std::process::id()));
        std::fs::write(&temp_path, yaml).map_err(|e| ExtractError::output(&temp_path, e))?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            ExtractError::output(path, e)
        })?;
        Ok(())
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> ExtractResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ExtractError::output(path, e))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Remove a manifest left behind by an earlier run
    pub fn remove_stale(path: &Path) -> ExtractResult<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                log::debug!("Removed stale manifest {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ExtractError::output(path, e)),
        }
    }
}
