//! Core domain logic for the session ledger.
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing `HH:MM:SS User Start|End` log lines into events
//! - Grouping events per user and reconciling missing boundaries
//! - Aggregating sessions into per-user reports

pub mod aggregate;
pub mod bucket;
pub mod event;
pub mod input;
pub mod ledger;
pub mod log;
pub mod reconcile;
pub mod report;
pub mod types;

pub use aggregate::{Session, UserSessions, aggregate};
pub use bucket::{UserBucket, UserBuckets, group_events};
pub use event::{Event, ParseError, parse_line};
pub use input::{InputError, read_lines};
pub use ledger::{Ledger, LedgerError, build_report, process_lines, report_file};
pub use log::{EventLog, ParseMode, RejectedLine, parse_lines};
pub use reconcile::{LogWindow, ReconcilePlan, ReconciledBucket, reconcile, reconcile_all};
pub use report::{Report, UserReport};
pub use types::{Action, UserId, ValidationError, validate_username};
