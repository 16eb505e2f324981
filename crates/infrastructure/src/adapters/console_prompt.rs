//! Confirmation prompt adapters.

use std::io::{self, BufRead, Write};

use reqtab_application::ports::ConfirmPrompt;
use tracing::warn;

/// Asks on the terminal and reads a `y`/`yes` answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    /// Creates the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl ConfirmPrompt for ConsolePrompt {
    fn confirm(&self, title: &str, message: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if writeln!(stderr, "{title}\n{message} [y/N] ").is_err() {
            return false;
        }
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}

/// Answers every prompt with a fixed value, for scripted runs.
#[derive(Debug, Clone, Copy)]
pub struct StaticPrompt(pub bool);

impl ConfirmPrompt for StaticPrompt {
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.0
    }
}
