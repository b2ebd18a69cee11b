//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Per-user session report for Start/End event logs.
///
/// Reads each log file, pairs every user's Start and End lines into
/// sessions, and prints one `<user> <sessions> <total_seconds>` line per
/// user. Sessions still open at either end of a log are clamped to the
/// first or last timestamp in that log.
#[derive(Debug, Parser)]
#[command(name = "sl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reject a file on its first malformed line instead of skipping the line.
    #[arg(long)]
    pub strict: bool,

    /// Print each report as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// Log files to report on.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}
