//! Editor Settings Domain Model
//!
//! Tunables of the editing session.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Settings for the editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Maximum number of responses kept per request.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Delay before drag state is cleared after a gesture ends.
    #[serde(default = "default_drag_cleanup_delay_ms")]
    pub drag_cleanup_delay_ms: u64,

    /// Delay before hovering a request or tab switches the view to it.
    #[serde(default = "default_hover_preview_delay_ms")]
    pub hover_preview_delay_ms: u64,

    /// Collections document. `None` uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

const fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

const fn default_drag_cleanup_delay_ms() -> u64 {
    100
}

const fn default_hover_preview_delay_ms() -> u64 {
    200
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            drag_cleanup_delay_ms: default_drag_cleanup_delay_ms(),
            hover_preview_delay_ms: default_hover_preview_delay_ms(),
            data_file: None,
        }
    }
}

impl EditorSettings {
    /// Drag cleanup delay as a duration.
    #[must_use]
    pub const fn drag_cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.drag_cleanup_delay_ms)
    }

    /// Hover preview delay as a duration.
    #[must_use]
    pub const fn hover_preview_delay(&self) -> Duration {
        Duration::from_millis(self.hover_preview_delay_ms)
    }
}
