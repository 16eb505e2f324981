//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the editing session and external
//! systems. Each port is a trait implemented by adapters in the
//! infrastructure layer.

mod clock;
mod collection_store;
mod confirm_prompt;
mod notifier;
mod system_clipboard;

pub use clock::Clock;
pub use collection_store::{CollectionStore, StoreError};
pub use confirm_prompt::ConfirmPrompt;
pub use notifier::{Notifier, Severity};
pub use system_clipboard::{ClipboardBridgeError, SystemClipboard};
