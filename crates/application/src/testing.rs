//! In-memory port doubles and an editor fixture for unit tests.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::new_without_default)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, Utc};
use reqtab_domain::{Collection, EditorSettings};

use crate::editor::{Editor, EditorPorts};
use crate::ports::{
    ClipboardBridgeError, Clock, CollectionStore, ConfirmPrompt, Notifier, Severity, StoreError,
    SystemClipboard,
};

/// Store keeping the last saved document in memory.
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Vec<Collection>>,
    saves: Mutex<usize>,
    failing: Mutex<bool>,
}

impl MemoryStore {
    pub fn with(collections: Vec<Collection>) -> Self {
        Self {
            document: Mutex::new(collections),
            ..Self::default()
        }
    }

    pub fn fail_saves(&self, failing: bool) {
        *self.failing.lock().expect("Lock poisoned") = failing;
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().expect("Lock poisoned")
    }

    pub fn document(&self) -> Vec<Collection> {
        self.document.lock().expect("Lock poisoned").clone()
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self) -> Result<Vec<Collection>, StoreError> {
        Ok(self.document())
    }

    fn save(&self, collections: &[Collection]) -> Result<(), StoreError> {
        if *self.failing.lock().expect("Lock poisoned") {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        *self.document.lock().expect("Lock poisoned") = collections.to_vec();
        *self.saves.lock().expect("Lock poisoned") += 1;
        Ok(())
    }
}

/// Notifier recording every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().expect("Lock poisoned").clone()
    }

    pub fn last(&self) -> Option<(Severity, String)> {
        self.messages().pop()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages().iter().filter(|(s, _)| *s == severity).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .expect("Lock poisoned")
            .push((severity, message.to_string()));
    }
}

/// System clipboard recording writes, optionally refusing them.
#[derive(Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl RecordingClipboard {
    pub fn fail(&self, failing: bool) {
        *self.failing.lock().expect("Lock poisoned") = failing;
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("Lock poisoned").clone()
    }
}

impl SystemClipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardBridgeError> {
        if *self.failing.lock().expect("Lock poisoned") {
            return Err(ClipboardBridgeError::Unavailable("no display".to_string()));
        }
        self.writes.lock().expect("Lock poisoned").push(text.to_string());
        Ok(())
    }
}

/// Prompt answering with a preset value and recording the titles asked.
pub struct ScriptedPrompt {
    answer: Mutex<bool>,
    asked: Mutex<Vec<String>>,
}

impl Default for ScriptedPrompt {
    fn default() -> Self {
        Self {
            answer: Mutex::new(true),
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedPrompt {
    pub fn answer(&self, answer: bool) {
        *self.answer.lock().expect("Lock poisoned") = answer;
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().expect("Lock poisoned").clone()
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&self, title: &str, _message: &str) -> bool {
        self.asked.lock().expect("Lock poisoned").push(title.to_string());
        *self.answer.lock().expect("Lock poisoned")
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()),
        }
    }
}

impl ManualClock {
    pub fn advance_ms(&self, ms: i64) {
        *self.now.lock().expect("Lock poisoned") += TimeDelta::milliseconds(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("Lock poisoned")
    }
}

/// An editor wired to test doubles, with handles on each double.
pub struct Fixture {
    pub editor: Editor,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub clipboard: Arc<RecordingClipboard>,
    pub prompt: Arc<ScriptedPrompt>,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_collections(Vec::new())
    }

    /// Seeds the store; call [`Editor::load`] to read it.
    pub fn with_collections(collections: Vec<Collection>) -> Self {
        let store = Arc::new(MemoryStore::with(collections));
        let notifier = Arc::new(RecordingNotifier::default());
        let clipboard = Arc::new(RecordingClipboard::default());
        let prompt = Arc::new(ScriptedPrompt::default());
        let clock = Arc::new(ManualClock::default());
        let ports = EditorPorts {
            store: store.clone(),
            notifier: notifier.clone(),
            clipboard: clipboard.clone(),
            prompt: prompt.clone(),
            clock: clock.clone(),
        };
        Self {
            editor: Editor::new(EditorSettings::default(), ports),
            store,
            notifier,
            clipboard,
            prompt,
            clock,
        }
    }
}
