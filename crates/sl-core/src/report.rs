//! Per-user totals and their text rendering.

use std::fmt;

use serde::Serialize;

use crate::aggregate::UserSessions;
use crate::types::UserId;

/// Session count and total time for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserReport {
    pub user: UserId,
    pub sessions: usize,
    pub total_seconds: i64,
}

impl fmt::Display for UserReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.user, self.sessions, self.total_seconds)
    }
}

/// Report for one log, users in order of first appearance.
///
/// Displays as one `<user> <sessions> <total_seconds>` line per user with no
/// trailing newline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Report {
    pub users: Vec<UserReport>,
}

impl Report {
    /// Builds the report, skipping users without sessions.
    pub fn from_sessions(users: &[UserSessions]) -> Self {
        let users = users
            .iter()
            .filter(|u| !u.sessions.is_empty())
            .map(|u| UserReport {
                user: u.user.clone(),
                sessions: u.sessions.len(),
                total_seconds: u.total_secs(),
            })
            .collect();
        Self { users }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Looks up a user's line.
    pub fn get(&self, user: &str) -> Option<&UserReport> {
        self.users.iter().find(|u| u.user.as_str() == user)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, user) in self.users.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{user}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(user: &str, sessions: usize, total_seconds: i64) -> UserReport {
        UserReport {
            user: UserId::new(user).unwrap(),
            sessions,
            total_seconds,
        }
    }

    #[test]
    fn renders_lines_without_trailing_newline() {
        let report = Report {
            users: vec![line("ALICE99", 4, 240), line("CHARLIE", 3, 37)],
        };
        assert_eq!(report.to_string(), "ALICE99 4 240\nCHARLIE 3 37");
    }

    #[test]
    fn empty_report_renders_nothing() {
        assert_eq!(Report::default().to_string(), "");
    }

    #[test]
    fn serializes_as_array() {
        let report = Report {
            users: vec![line("a", 1, 5)],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"[{"user":"a","sessions":1,"total_seconds":5}]"#);
    }
}
