//! Cooperative queue of short, fixed-delay callbacks.
//!
//! Nothing runs on its own: the owner polls [`DeferredQueue::take_due`] with
//! the current time and runs whatever is returned.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqtab_domain::TableKind;

/// Work scheduled to run after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    /// Forget the drag snapshot and hover targets of a finished gesture.
    ClearDrag {
        /// Gesture the cleanup belongs to.
        gesture: u64,
    },
    /// Show the hovered request.
    PreviewRequest {
        /// Hovered request.
        request_id: String,
    },
    /// Show the hovered table tab.
    SelectTab {
        /// Hovered tab.
        tab: TableKind,
    },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: DateTime<Utc>,
    sequence: u64,
    task: DeferredTask,
}

/// Pending deferred tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: Vec<Scheduled>,
    next_sequence: u64,
}

impl DeferredQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Schedules `task` to run `delay` after `now`.
    pub fn schedule(&mut self, now: DateTime<Utc>, delay: Duration, task: DeferredTask) {
        let delay = TimeDelta::from_std(delay).unwrap_or(TimeDelta::MAX);
        let due = now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.pending.push(Scheduled {
            due,
            sequence: self.next_sequence,
            task,
        });
        self.next_sequence += 1;
    }

    /// Removes and returns every task due at `now`, in run order.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<DeferredTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;
        due.sort_by_key(|s| (s.due, s.sequence));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Earliest due time among pending tasks.
    #[must_use]
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
