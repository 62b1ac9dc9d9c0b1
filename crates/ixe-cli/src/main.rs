//! ex-informix CLI - export Informix query results as CSV tables with manifests

use anyhow::{Context, Result};
use clap::Parser;
use ixe_extract::error::{EXIT_FAULT, EXIT_SUCCESS};
use ixe_extract::ExtractError;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

mod cli;

use cli::Cli;

/// Exit code when the process is invoked without a data directory
const EXIT_USAGE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(data_dir) = cli.data.as_deref() else {
        eprintln!("Data folder not set.");
        return ExitCode::from(EXIT_USAGE);
    };

    match run(data_dir) {
        Ok(()) => {
            println!("Success");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(data_dir: &Path) -> Result<()> {
    log::debug!("Data directory: {}", data_dir.display());
    let outcomes = ixe_extract::run_job(data_dir)
        .with_context(|| format!("Extraction from {} failed", data_dir.display()))?;
    for outcome in &outcomes {
        log::debug!(
            "{}: {} rows in {} attempt(s)",
            outcome.table(),
            outcome.rows(),
            outcome.attempts()
        );
    }
    Ok(())
}

/// Data-layer faults exit with 1, everything else with 2
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<ExtractError>())
        .map(ExtractError::exit_code)
        .unwrap_or(EXIT_FAULT)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
