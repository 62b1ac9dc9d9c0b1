//! A complete extraction run driven by config.yml

use crate::error::ExtractResult;
use crate::runner::{ExportOutcome, QueryRunner};
use ixe_core::JobConfig;
use std::path::Path;

/// Load `config.yml` from `data_dir`, open the connection and export every
/// configured query in order.
///
/// The connection is opened once and dropped when the run ends.
pub fn run_job(data_dir: &Path) -> ExtractResult<Vec<ExportOutcome>> {
    let config = JobConfig::load_from_dir(data_dir)?;
    let db = ixe_db::connect(&config.parameters.db)?;

    let mut runner = QueryRunner::from_params(db.as_ref(), data_dir, &config.parameters.db)?;
    let outcomes = runner.run_all(&config.parameters.queries)?;

    let exported = outcomes.iter().filter(|o| o.rows() > 0).count();
    log::info!(
        "Processed {} queries ({} with data)",
        outcomes.len(),
        exported
    );
    Ok(outcomes)
}
