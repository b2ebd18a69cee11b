//! Start/End events and the single-line parser.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Action, UserId, ValidationError};

/// The timestamp format used in log lines.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Why a single log line was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 3 fields (time, user, action), found {found}")]
    FieldCount { found: usize },

    #[error("invalid timestamp {value:?} (expected HH:MM:SS)")]
    InvalidTimestamp { value: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// One Start or End marker for a user.
///
/// Events compare by timestamp first; user and action only break ties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    timestamp: NaiveTime,
    user: UserId,
    action: Action,
}

impl Event {
    pub const fn new(timestamp: NaiveTime, user: UserId, action: Action) -> Self {
        Self {
            timestamp,
            user,
            action,
        }
    }

    pub const fn timestamp(&self) -> NaiveTime {
        self.timestamp
    }

    pub const fn user(&self) -> &UserId {
        &self.user
    }

    pub const fn action(&self) -> Action {
        self.action
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.user.cmp(&other.user))
            .then_with(|| self.action.cmp(&other.action))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.user,
            self.action
        )
    }
}

/// Parses a strict, zero-padded `HH:MM:SS` time of day.
///
/// The value carries no date; two timestamps are only comparable within a
/// single day.
pub fn parse_timestamp(value: &str) -> Result<NaiveTime, ParseError> {
    let invalid = || ParseError::InvalidTimestamp {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 8
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b':',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    let time = NaiveTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    // chrono reads ":60" as a leap second
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(time)
}

/// Parses one log line of the form `HH:MM:SS User Action`.
///
/// Surrounding and repeated whitespace between fields is ignored.
pub fn parse_line(line: &str) -> Result<Event, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [timestamp, user, action] = fields.as_slice() else {
        return Err(ParseError::FieldCount {
            found: fields.len(),
        });
    };

    let action: Action = action.parse()?;
    let user = UserId::new(*user)?;
    let timestamp = parse_timestamp(timestamp)?;

    Ok(Event::new(timestamp, user, action))
}
