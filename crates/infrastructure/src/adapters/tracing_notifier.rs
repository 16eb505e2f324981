//! Notifier adapter logging through `tracing`.

use reqtab_application::ports::{Notifier, Severity};
use tracing::{error, info, warn};

/// Routes notifications to the log so headless runs still surface them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info | Severity::Success => info!(%severity, "{message}"),
            Severity::Warning => warn!(%severity, "{message}"),
            Severity::Error => error!(%severity, "{message}"),
        }
    }
}
