//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tls-policy-audit")]
#[command(version)]
#[command(about = "Audit sslscan results against a TLS security policy", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config/default.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to audit; repeat to audit several (overrides the configured list)
    #[arg(long = "host", value_name = "HOST")]
    pub hosts: Vec<String>,

    /// Read saved `<host>.xml` scans from this directory instead of running the scanner
    #[arg(long, value_name = "DIR")]
    pub scan_dir: Option<PathBuf>,

    /// Static cipher tier dataset used instead of fetching the cheat sheet
    #[arg(long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write output to file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of hosts evaluated concurrently
    #[arg(short, long, value_name = "N")]
    pub parallel: Option<usize>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal tables (default)
    Table,
    /// JSON output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
