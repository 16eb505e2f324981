//! Confirmation prompt port.

/// Asks the user to confirm a destructive action.
pub trait ConfirmPrompt: Send + Sync {
    /// Returns `true` when the user accepts.
    fn confirm(&self, title: &str, message: &str) -> bool;
}
