//! Adapters implementing the application ports.

mod arboard_clipboard;
mod console_prompt;
mod system_clock;
mod tracing_notifier;

pub use arboard_clipboard::ArboardClipboard;
pub use console_prompt::{ConsolePrompt, StaticPrompt};
pub use system_clock::SystemClock;
pub use tracing_notifier::TracingNotifier;
