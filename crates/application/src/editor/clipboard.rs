//! Copy and paste between editable tables and generic visualization tables.

use reqtab_domain::{
    ClipboardContent, ClipboardPayload, PasteTarget, TableKind, TableView, TextCoercion,
};
use tracing::{debug, warn};

use super::Editor;
use crate::error::ApplicationResult;
use crate::ports::Severity;

fn source_label(kind: TableKind) -> String {
    if kind.is_body() {
        "URL Request Body".to_string()
    } else {
        format!("URL Request {kind}")
    }
}

impl Editor {
    /// Copies the selected rows of a table. Returns the number of copied
    /// rows; nothing selected is reported and copies nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn copy_rows(&mut self, kind: TableKind) -> ApplicationResult<usize> {
        let table = self.active_table(kind)?;
        let rows: Vec<_> = self
            .selection
            .indices(kind)
            .into_iter()
            .filter(|&i| !table.is_sentinel(i))
            .filter_map(|i| table.row(i))
            .collect();
        if rows.is_empty() {
            self.notify(Severity::Info, "No items selected to copy");
            return Ok(0);
        }

        let count = rows.len();
        let payload = ClipboardPayload::new(
            ClipboardContent::KeyValuePairs(rows),
            source_label(kind),
            self.ports.clock.now(),
        );
        self.publish(payload);
        self.notify(Severity::Success, &format!("Copied {count} item(s) to clipboard"));
        Ok(count)
    }

    /// Copies rows of a generic table. Unselectable and unknown rows are
    /// skipped. Returns the number of copied rows.
    pub fn copy_table_rows(&mut self, view: &TableView, selected: &[usize], source: &str) -> usize {
        let rows = view.snapshot(selected);
        if rows.is_empty() {
            self.notify(Severity::Info, "No rows selected to copy");
            return 0;
        }

        let count = rows.len();
        let payload = ClipboardPayload::new(
            ClipboardContent::TableRows {
                rows,
                headers: view.headers.clone(),
            },
            source,
            self.ports.clock.now(),
        );
        self.publish(payload);
        self.notify(Severity::Success, &format!("Copied {count} row(s) to clipboard"));
        count
    }

    /// Appends the clipboard rows to a table of the displayed request.
    /// Returns the number of pasted rows; an empty clipboard is reported and
    /// pastes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn paste_rows(&mut self, kind: TableKind) -> ApplicationResult<usize> {
        let Some(rows) = self.clipboard.payload().map(ClipboardPayload::key_value_rows) else {
            self.notify(Severity::Info, "No data in clipboard to paste");
            return Ok(0);
        };

        let mut table = self.active_table_mut(kind)?;
        let count = table.append_rows(rows, TextCoercion::Classify);
        table.maintain();
        debug!(%kind, count, "pasted rows");
        self.notify(Severity::Success, &format!("Pasted {count} item(s) from clipboard"));
        Ok(count)
    }

    /// Appends the clipboard rows to a generic table. Returns the number of
    /// pasted rows.
    pub fn paste_into_table_view(&mut self, view: &mut TableView) -> usize {
        let Some(rows) = self.clipboard.payload().map(ClipboardPayload::table_rows) else {
            self.notify(Severity::Info, "No data in clipboard to paste");
            return 0;
        };

        let count = view.append(rows);
        self.notify(Severity::Success, &format!("Pasted {count} row(s) from clipboard"));
        count
    }

    /// The session clipboard.
    #[must_use]
    pub const fn clipboard(&self) -> &reqtab_domain::Clipboard {
        &self.clipboard
    }

    /// Empties the session clipboard.
    pub fn clear_clipboard(&mut self) {
        self.clipboard.clear();
    }

    /// Whether the clipboard can be pasted into `target`.
    #[must_use]
    pub fn is_clipboard_compatible(&self, target: PasteTarget) -> bool {
        self.clipboard.is_compatible_with(target)
    }

    /// Stores the payload and mirrors its text to the system clipboard. A
    /// failing system clipboard keeps the text locally instead.
    fn publish(&mut self, payload: ClipboardPayload) {
        let text = payload.system_text();
        debug!(rows = payload.len(), source = %payload.source, "clipboard updated");
        self.clipboard.set(payload);
        if let Err(error) = self.ports.clipboard.write_text(&text) {
            warn!(%error, "system clipboard write failed, keeping a local copy");
            self.clipboard.keep_fallback(text);
        }
    }
}
