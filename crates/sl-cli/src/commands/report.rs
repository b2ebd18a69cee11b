//! Report command: one report block per log file.
//!
//! A file that cannot be read, is empty, or holds no valid lines produces no
//! output at all; the reason goes to the log instead, so stdout only ever
//! carries reports.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use sl_core::{LedgerError, Report, report_file};

use crate::{Config, OutputFormat};

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A report was written.
    Reported,
    /// Nothing to report: unreadable, empty, or no valid lines.
    NoReport,
    /// Strict mode hit a malformed line.
    Rejected,
}

/// Writes `report` in the configured format, followed by a newline.
pub fn write_report<W: Write>(writer: &mut W, report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, report).context("failed to serialize report")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, path: &Path, config: &Config) -> Result<Outcome> {
    match report_file(path, config.parse_mode()) {
        Ok(report) => {
            tracing::debug!(path = %path.display(), users = report.users.len(), "built report");
            write_report(writer, &report, config.format)?;
            Ok(Outcome::Reported)
        }
        Err(err @ LedgerError::Malformed { .. }) => {
            tracing::error!(path = %path.display(), "{err}");
            Ok(Outcome::Rejected)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "no report: {err}");
            Ok(Outcome::NoReport)
        }
    }
}
