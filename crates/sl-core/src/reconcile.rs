//! Boundary reconciliation.
//!
//! A log only covers a window of time, so users may already be connected when
//! it starts or still be connected when it ends. Such sessions show up as an
//! End without a preceding Start, or a Start without a following End.
//! Reconciliation pads each user's sequences with the log's first and last
//! timestamps until every Start has a positional End.
//!
//! # Algorithm
//!
//! 1. Walk `starts` and `ends` by position. Whenever the aligned start is
//!    later than the aligned end, the End belongs to a session that began
//!    before the log did, so a synthetic start is placed at the front and all
//!    later starts shift right by one. The walk is a single pass over the
//!    shifted sequence and stops as soon as either side runs out.
//! 2. Pad the shorter side: missing ends are appended as the last timestamp,
//!    missing starts are prepended as the first timestamp.
//!
//! Both steps only ever prepend starts and append ends, so the whole repair
//! is described by two counts. [`plan`] computes them without touching the
//! bucket and [`apply`] materializes them.

use std::cmp::Ordering;
use std::iter;

use chrono::NaiveTime;

use crate::bucket::{UserBucket, UserBuckets};
use crate::log::EventLog;
use crate::types::UserId;

/// The first and last timestamps of the whole log, across all users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogWindow {
    pub first: NaiveTime,
    pub last: NaiveTime,
}

impl LogWindow {
    pub const fn new(first: NaiveTime, last: NaiveTime) -> Self {
        Self { first, last }
    }

    /// Window spanned by the first and last valid lines of `log`.
    pub fn of(log: &EventLog) -> Option<Self> {
        Some(Self::new(log.first_timestamp()?, log.last_timestamp()?))
    }
}

/// Synthetic boundaries needed to balance one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcilePlan {
    /// Copies of the window start to put in front of `starts`.
    pub leading_starts: usize,
    /// Copies of the window end to put after `ends`.
    pub trailing_ends: usize,
}

impl ReconcilePlan {
    pub const fn is_noop(&self) -> bool {
        self.leading_starts == 0 && self.trailing_ends == 0
    }
}

/// A bucket after reconciliation, with its Start and End sequences the same
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledBucket {
    pub user: UserId,
    pub starts: Vec<NaiveTime>,
    pub ends: Vec<NaiveTime>,
    pub plan: ReconcilePlan,
}

impl ReconciledBucket {
    /// Number of positional Start/End pairs.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Pairs `starts[i]` with `ends[i]`.
    pub fn pairs(&self) -> impl Iterator<Item = (NaiveTime, NaiveTime)> + '_ {
        self.starts.iter().copied().zip(self.ends.iter().copied())
    }

    /// Whether the start of pair `i` was synthesized from the window.
    pub const fn synthetic_start(&self, i: usize) -> bool {
        i < self.plan.leading_starts
    }

    /// Whether the end of pair `i` was synthesized from the window.
    pub fn synthetic_end(&self, i: usize) -> bool {
        i + self.plan.trailing_ends >= self.ends.len()
    }
}

/// Computes how many synthetic boundaries `starts`/`ends` need.
pub fn plan(starts: &[NaiveTime], ends: &[NaiveTime], first: NaiveTime) -> ReconcilePlan {
    // Step 1: positional walk over the (virtually) shifted starts.
    let mut shift = 0;
    let mut i = 0;
    while i < (starts.len() + shift).min(ends.len()) {
        let start = if i < shift { first } else { starts[i - shift] };
        if start > ends[i] {
            shift += 1;
        }
        i += 1;
    }

    // Step 2: pad whichever side is shorter.
    let starts_len = starts.len() + shift;
    match starts_len.cmp(&ends.len()) {
        Ordering::Greater => ReconcilePlan {
            leading_starts: shift,
            trailing_ends: starts_len - ends.len(),
        },
        Ordering::Less => ReconcilePlan {
            leading_starts: shift + (ends.len() - starts_len),
            trailing_ends: 0,
        },
        Ordering::Equal => ReconcilePlan {
            leading_starts: shift,
            trailing_ends: 0,
        },
    }
}

/// Materializes `plan` into `bucket`.
pub fn apply(bucket: &mut UserBucket, plan: ReconcilePlan, window: LogWindow) {
    if plan.leading_starts > 0 {
        let starts = std::mem::take(&mut bucket.starts);
        bucket.starts = iter::repeat_n(window.first, plan.leading_starts)
            .chain(starts)
            .collect();
    }
    bucket
        .ends
        .extend(iter::repeat_n(window.last, plan.trailing_ends));
}

/// Plans and applies the repair for one bucket, returning what was done.
///
/// Afterwards `bucket.starts.len() == bucket.ends.len()`.
pub fn reconcile(bucket: &mut UserBucket, window: LogWindow) -> ReconcilePlan {
    let plan = plan(&bucket.starts, &bucket.ends, window.first);
    if !plan.is_noop() {
        tracing::debug!(
            user = %bucket.user,
            leading_starts = plan.leading_starts,
            trailing_ends = plan.trailing_ends,
            "inserted synthetic boundaries"
        );
    }
    apply(bucket, plan, window);
    debug_assert!(bucket.is_balanced());
    plan
}

/// Reconciles every bucket against the shared log window.
///
/// Returns `None` if there are no buckets.
pub fn reconcile_all(buckets: UserBuckets, window: LogWindow) -> Option<Vec<ReconciledBucket>> {
    if buckets.is_empty() {
        return None;
    }

    let reconciled = buckets
        .into_iter()
        .map(|mut bucket| {
            let plan = reconcile(&mut bucket, window);
            ReconciledBucket {
                user: bucket.user,
                starts: bucket.starts,
                ends: bucket.ends,
                plan,
            }
        })
        .collect();
    Some(reconciled)
}
