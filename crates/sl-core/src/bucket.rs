//! Per-user grouping of Start and End timestamps.

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::event::Event;
use crate::types::{Action, UserId};

/// The Start and End timestamps of one user, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBucket {
    pub user: UserId,
    pub starts: Vec<NaiveTime>,
    pub ends: Vec<NaiveTime>,
}

impl UserBucket {
    pub const fn new(user: UserId) -> Self {
        Self {
            user,
            starts: Vec::new(),
            ends: Vec::new(),
        }
    }

    fn push(&mut self, action: Action, timestamp: NaiveTime) {
        match action {
            Action::Start => self.starts.push(timestamp),
            Action::End => self.ends.push(timestamp),
        }
    }

    /// True once every Start has a positional End.
    pub fn is_balanced(&self) -> bool {
        self.starts.len() == self.ends.len()
    }
}

/// User buckets keyed by user, iterated in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct UserBuckets {
    buckets: Vec<UserBucket>,
    index: HashMap<UserId, usize>,
}

impl UserBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, user: &UserId) -> Option<&UserBucket> {
        self.index.get(user).map(|&i| &self.buckets[i])
    }

    /// Returns the bucket for `user`, appending a new one if unseen.
    pub fn entry(&mut self, user: &UserId) -> &mut UserBucket {
        let next = self.buckets.len();
        let i = *self.index.entry(user.clone()).or_insert(next);
        if i == next {
            self.buckets.push(UserBucket::new(user.clone()));
        }
        &mut self.buckets[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserBucket> {
        self.buckets.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, UserBucket> {
        self.buckets.iter_mut()
    }
}

impl<'a> IntoIterator for &'a UserBuckets {
    type Item = &'a UserBucket;
    type IntoIter = std::slice::Iter<'a, UserBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for UserBuckets {
    type Item = UserBucket;
    type IntoIter = std::vec::IntoIter<UserBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

/// Buckets events by user and action, preserving arrival order.
///
/// Returns `None` if there are no events.
pub fn group_events(events: &[Event]) -> Option<UserBuckets> {
    let mut buckets = UserBuckets::new();
    for event in events {
        buckets
            .entry(event.user())
            .push(event.action(), event.timestamp());
    }

    if buckets.is_empty() {
        return None;
    }
    tracing::debug!(users = buckets.len(), events = events.len(), "grouped events");
    Some(buckets)
}
