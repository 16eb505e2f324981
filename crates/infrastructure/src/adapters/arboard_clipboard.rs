//! System clipboard adapter backed by `arboard`.

use reqtab_application::ports::{ClipboardBridgeError, SystemClipboard};

/// Writes to the desktop clipboard.
///
/// A handle is opened per write; headless sessions report
/// [`ClipboardBridgeError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    /// Creates the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SystemClipboard for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardBridgeError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardBridgeError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardBridgeError::WriteFailed(e.to_string()))
    }
}
