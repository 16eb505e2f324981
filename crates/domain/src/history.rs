//! Response History Domain Model
//!
//! Bounded, most-recent-first history of responses recorded for a request.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of responses kept per request.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Outcome of an executed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The transport returned a response.
    Success,
    /// The transport failed.
    Error,
}

/// A single recorded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEntry {
    /// Unique identifier for this entry.
    pub id: String,
    /// When the response was recorded.
    pub timestamp: DateTime<Utc>,
    /// Response body, or the error message.
    pub data: String,
    /// Outcome.
    pub status: ResponseStatus,
}

impl ResponseEntry {
    /// Creates an entry with a fresh id.
    #[must_use]
    pub fn new(data: impl Into<String>, status: ResponseStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: crate::generate_id(),
            timestamp,
            data: data.into(),
            status,
        }
    }
}

/// Response history with a maximum size limit.
///
/// Stored documents hold the entries only, newest first; the capacity is a
/// runtime setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VecDeque<ResponseEntry>", into = "VecDeque<ResponseEntry>")]
pub struct ResponseHistory {
    entries: VecDeque<ResponseEntry>,
    capacity: usize,
}

impl Default for ResponseHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl From<VecDeque<ResponseEntry>> for ResponseHistory {
    fn from(entries: VecDeque<ResponseEntry>) -> Self {
        let mut history = Self {
            entries,
            capacity: DEFAULT_HISTORY_CAPACITY,
        };
        history.trim();
        history
    }
}

impl From<ResponseHistory> for VecDeque<ResponseEntry> {
    fn from(history: ResponseHistory) -> Self {
        history.entries
    }
}

impl ResponseHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Adds an entry at the front, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, entry: ResponseEntry) {
        self.entries.push_front(entry);
        self.trim();
    }

    /// The newest entry.
    #[must_use]
    pub fn latest(&self) -> Option<&ResponseEntry> {
        self.entries.front()
    }

    /// Returns an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ResponseEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ResponseEntry> {
        self.entries.iter()
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sets the maximum number of entries and trims if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.trim();
    }

    fn trim(&mut self) {
        self.entries.truncate(self.capacity);
    }
}
