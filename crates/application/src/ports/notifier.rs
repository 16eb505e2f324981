//! Notification port.

use std::fmt;

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// A completed action.
    Success,
    /// A rejected action; nothing changed.
    Warning,
    /// A failure the user should act on.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Surfaces messages to the user. Never alters editor state.
pub trait Notifier: Send + Sync {
    /// Shows `message` with the given severity.
    fn notify(&self, severity: Severity, message: &str);
}
