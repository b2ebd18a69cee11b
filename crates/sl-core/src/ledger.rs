//! The end-to-end pipeline: lines in, per-user report out.
//!
//! Stages run strictly in order, each consuming the previous stage's output:
//! parse → group → reconcile → aggregate → report.

use std::path::Path;

use thiserror::Error;

use crate::aggregate::{UserSessions, aggregate};
use crate::bucket::group_events;
use crate::event::ParseError;
use crate::input::{InputError, read_lines};
use crate::log::{ParseMode, RejectedLine, parse_lines};
use crate::reconcile::{LogWindow, reconcile_all};
use crate::report::Report;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("line {line_number}: {error}")]
    Malformed {
        line_number: usize,
        #[source]
        error: ParseError,
    },

    #[error("no valid events to report")]
    NoData,
}

impl LedgerError {
    /// True for the failures that simply mean "nothing to report".
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData | Self::Input(InputError::Empty { .. }))
    }
}

impl From<RejectedLine> for LedgerError {
    fn from(rejected: RejectedLine) -> Self {
        Self::Malformed {
            line_number: rejected.line_number,
            error: rejected.error,
        }
    }
}

/// Sessions of every user in a log, plus the lines that were dropped.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub sessions: Vec<UserSessions>,
    pub rejected: Vec<RejectedLine>,
}

impl Ledger {
    pub fn report(&self) -> Report {
        Report::from_sessions(&self.sessions)
    }
}

/// Runs the pipeline over in-memory lines.
pub fn process_lines<I, S>(lines: I, mode: ParseMode) -> Result<Ledger, LedgerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let log = parse_lines(lines, mode)?;
    let window = LogWindow::of(&log).ok_or(LedgerError::NoData)?;
    let buckets = group_events(log.events()).ok_or(LedgerError::NoData)?;
    let reconciled = reconcile_all(buckets, window).ok_or(LedgerError::NoData)?;
    let sessions = aggregate(&reconciled).ok_or(LedgerError::NoData)?;

    if !log.rejected().is_empty() {
        tracing::debug!(dropped = log.rejected().len(), "ignored malformed lines");
    }

    Ok(Ledger {
        sessions,
        rejected: log.rejected().to_vec(),
    })
}

/// Builds the per-user report for in-memory lines.
pub fn build_report<I, S>(lines: I, mode: ParseMode) -> Result<Report, LedgerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(process_lines(lines, mode)?.report())
}

/// Reads `path` and builds its report.
pub fn report_file(path: &Path, mode: ParseMode) -> Result<Report, LedgerError> {
    let lines = read_lines(path)?;
    build_report(lines, mode)
}
