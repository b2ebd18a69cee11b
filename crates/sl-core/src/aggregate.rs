//! Pairing reconciled boundaries into sessions.

use chrono::NaiveTime;
use serde::Serialize;

use crate::reconcile::ReconciledBucket;
use crate::types::UserId;

/// One Start→End interval for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Session {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Whether `start` was taken from the log window rather than a Start line.
    pub synthetic_start: bool,
    /// Whether `end` was taken from the log window rather than an End line.
    pub synthetic_end: bool,
}

impl Session {
    /// Elapsed whole seconds.
    ///
    /// Negative only if the log wraps past midnight, which is not supported.
    pub fn duration_secs(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_seconds()
    }
}

/// All sessions of one user, in positional order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSessions {
    pub user: UserId,
    pub sessions: Vec<Session>,
}

impl UserSessions {
    pub fn durations(&self) -> impl Iterator<Item = i64> + '_ {
        self.sessions.iter().map(Session::duration_secs)
    }

    pub fn total_secs(&self) -> i64 {
        self.durations().sum()
    }
}

fn sessions_of(bucket: &ReconciledBucket) -> UserSessions {
    let sessions = bucket
        .pairs()
        .enumerate()
        .map(|(i, (start, end))| Session {
            start,
            end,
            synthetic_start: bucket.synthetic_start(i),
            synthetic_end: bucket.synthetic_end(i),
        })
        .collect();

    UserSessions {
        user: bucket.user.clone(),
        sessions,
    }
}

/// Pairs `starts[i]` with `ends[i]` for every user.
///
/// Returns `None` if no user ends up with a session.
pub fn aggregate(buckets: &[ReconciledBucket]) -> Option<Vec<UserSessions>> {
    let users: Vec<UserSessions> = buckets.iter().map(sessions_of).collect();

    if users.iter().all(|u| u.sessions.is_empty()) {
        return None;
    }
    Some(users)
}
