//! CLI argument definitions using clap derive API

use clap::Parser;
use std::path::PathBuf;

/// ex-informix - export Informix query results as CSV tables with manifests
#[derive(Parser, Debug)]
#[command(name = "ex-informix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory containing config.yml; tables are written to out/tables/
    #[arg(short, long, env = "KBC_DATADIR")]
    pub data: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
