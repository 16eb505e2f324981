//! System clipboard bridge port.

/// Error type for system clipboard writes.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardBridgeError {
    /// No system clipboard is reachable.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard rejected the text.
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Best-effort writer for the clipboard shared with other applications.
pub trait SystemClipboard: Send + Sync {
    /// Writes `text` to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard cannot be reached or written.
    fn write_text(&self, text: &str) -> Result<(), ClipboardBridgeError>;
}
