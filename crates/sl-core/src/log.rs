//! Parsing a whole log into an ordered event stream.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::event::{Event, ParseError, parse_line};

/// How malformed lines are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Drop malformed lines and keep going.
    #[default]
    Lenient,
    /// Stop at the first malformed line.
    Strict,
}

/// A line that did not parse, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line_number: usize,
    pub error: ParseError,
}

/// Valid events in input order, plus any lines that were dropped.
///
/// Events are never re-sorted: later stages rely on position.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
    rejected: Vec<RejectedLine>,
}

impl EventLog {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the first valid line in the log.
    pub fn first_timestamp(&self) -> Option<NaiveTime> {
        self.events.first().map(Event::timestamp)
    }

    /// Timestamp of the last valid line in the log.
    pub fn last_timestamp(&self) -> Option<NaiveTime> {
        self.events.last().map(Event::timestamp)
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Parses every line, keeping the valid ones in order.
///
/// In [`ParseMode::Strict`] the first malformed line is returned as an error.
pub fn parse_lines<I, S>(lines: I, mode: ParseMode) -> Result<EventLog, RejectedLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut log = EventLog::default();

    for (index, line) in lines.into_iter().enumerate() {
        match parse_line(line.as_ref()) {
            Ok(event) => log.events.push(event),
            Err(error) => {
                let rejected = RejectedLine {
                    line_number: index + 1,
                    error,
                };
                if mode == ParseMode::Strict {
                    return Err(rejected);
                }
                tracing::debug!(
                    line = rejected.line_number,
                    error = %rejected.error,
                    "dropping malformed line"
                );
                log.rejected.push(rejected);
            }
        }
    }

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &[&str] = &[
        "14:02:03 ALICE99 Start",
        "14:02:05 CHARLIE",
        "14:02:34 ALICE99 End",
        "14:02:40 BOB Pause",
        "14:03:02 CHARLIE Start",
    ];

    #[test]
    fn lenient_keeps_valid_lines_in_order() {
        let log = parse_lines(MIXED, ParseMode::Lenient).unwrap();

        let rendered: Vec<String> = log.events().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "14:02:03 ALICE99 Start",
                "14:02:34 ALICE99 End",
                "14:03:02 CHARLIE Start",
            ]
        );

        let dropped: Vec<usize> = log.rejected().iter().map(|r| r.line_number).collect();
        assert_eq!(dropped, vec![2, 4]);
    }

    #[test]
    fn strict_stops_at_first_malformed_line() {
        let err = parse_lines(MIXED, ParseMode::Strict).unwrap_err();
        assert_eq!(err.line_number, 2);
        assert_eq!(err.error, ParseError::FieldCount { found: 2 });
    }

    #[test]
    fn strict_accepts_clean_log() {
        let log = parse_lines(["10:00:00 a Start", "10:00:05 a End"], ParseMode::Strict).unwrap();
        assert_eq!(log.events().len(), 2);
        assert!(log.rejected().is_empty());
    }

    #[test]
    fn window_uses_line_order_not_min_max() {
        let log = parse_lines(
            ["12:00:00 a Start", "09:00:00 b Start", "11:00:00 a End"],
            ParseMode::Lenient,
        )
        .unwrap();
        assert_eq!(
            log.first_timestamp(),
            NaiveTime::from_hms_opt(12, 0, 0)
        );
        assert_eq!(
            log.last_timestamp(),
            NaiveTime::from_hms_opt(11, 0, 0)
        );
    }

    #[test]
    fn empty_input_gives_empty_log() {
        let log = parse_lines(Vec::<String>::new(), ParseMode::Lenient).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.first_timestamp(), None);
    }
}
