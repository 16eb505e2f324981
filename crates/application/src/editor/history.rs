//! Undo and the response history of the displayed request.

use reqtab_domain::{ResponseEntry, ResponseHistory, ResponseStatus};
use tracing::{debug, info};

use super::Editor;
use crate::error::ApplicationResult;
use crate::ports::Severity;

impl Editor {
    /// Reverts the most recent direct edit.
    ///
    /// Returns false when there was nothing to undo or the edited request
    /// or collection is gone; the entry is consumed either way.
    ///
    /// # Errors
    ///
    /// Returns an error when the recorded row no longer exists.
    pub fn undo(&mut self) -> ApplicationResult<bool> {
        let Some(entry) = self.undo.pop() else {
            return Ok(false);
        };
        let label = entry.label();
        let applied = entry.revert(&mut self.collections)?;
        debug!(label, applied, remaining = self.undo.len(), "undo");
        Ok(applied)
    }

    /// Number of edits that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Records a response on the displayed request and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn record_response(
        &mut self,
        data: impl Into<String>,
        status: ResponseStatus,
    ) -> ApplicationResult<String> {
        let entry = ResponseEntry::new(data, status, self.ports.clock.now());
        let id = entry.id.clone();
        let responses = &mut self.active_request_mut()?.responses;
        responses.push(entry);
        info!(response_id = %id, ?status, kept = responses.len(), "recorded response");
        self.autosave();
        Ok(id)
    }

    /// Response history of the displayed request, most recent first.
    #[must_use]
    pub fn response_history(&self) -> Option<&ResponseHistory> {
        self.active_request().map(|request| &request.responses)
    }

    /// Most recent response of the displayed request.
    #[must_use]
    pub fn latest_response(&self) -> Option<&ResponseEntry> {
        self.response_history()?.latest()
    }

    /// A response of the displayed request by id.
    #[must_use]
    pub fn response(&self, id: &str) -> Option<&ResponseEntry> {
        self.response_history()?.get(id)
    }

    /// Drops every response of the displayed request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn clear_response_history(&mut self) -> ApplicationResult<()> {
        self.active_request_mut()?.responses.clear();
        self.autosave();
        self.notify(Severity::Success, "Response history cleared");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::ports::Severity;
    use crate::testing::Fixture;
    use pretty_assertions::assert_eq;
    use reqtab_domain::{CellField, ResponseStatus, TableKind};

    fn fixture() -> Fixture {
        let mut fx = Fixture::new();
        let collection_id = fx.editor.create_collection();
        fx.editor.create_request(&collection_id).unwrap();
        fx
    }

    #[test]
    fn test_undo_on_empty_stack() {
        let mut fx = fixture();
        assert!(!fx.editor.undo().unwrap());
    }

    #[test]
    fn test_undo_pops_in_reverse_order() {
        let mut fx = fixture();
        fx.editor.set_url("https://a.test").unwrap();
        fx.editor.edit_cell(TableKind::Headers, 0, CellField::Value, "text/html").unwrap();
        assert_eq!(fx.editor.undo_depth(), 2);

        fx.editor.undo().unwrap();
        let request = fx.editor.active_request().unwrap();
        assert_eq!(request.headers[0].value, "*/*");
        assert_eq!(request.url, "https://a.test");

        fx.editor.undo().unwrap();
        assert_eq!(fx.editor.active_request().unwrap().url, "");
        assert_eq!(fx.editor.undo_depth(), 0);
    }

    #[test]
    fn test_undo_of_deleted_request_is_skipped() {
        let mut fx = fixture();
        let collection_id = fx.editor.collections()[0].id.clone();
        let request_id = fx.editor.active().unwrap().request_id.clone();
        fx.editor.rename_request(&request_id, "renamed").unwrap();
        fx.editor.delete_request(&collection_id, 0).unwrap();

        assert!(!fx.editor.undo().unwrap());
        assert_eq!(fx.editor.undo_depth(), 0);
    }

    #[test]
    fn test_drag_and_paste_do_not_record_undo() {
        let mut fx = fixture();
        fx.editor.toggle_selection(TableKind::Headers, 0).unwrap();
        fx.editor.copy_rows(TableKind::Headers).unwrap();
        fx.editor.paste_rows(TableKind::Params).unwrap();
        fx.editor.start_drag(TableKind::Headers, 0).unwrap();
        fx.editor
            .drop_within_table(crate::drag::DropTarget {
                kind: TableKind::Headers,
                index: 2,
                same_container: true,
            })
            .unwrap();

        assert_eq!(fx.editor.undo_depth(), 0);
    }

    #[test]
    fn test_history_keeps_ten_most_recent() {
        let mut fx = fixture();
        let ids: Vec<String> = (0..11)
            .map(|i| {
                fx.clock.advance_ms(1);
                fx.editor
                    .record_response(format!("{{\"n\":{i}}}"), ResponseStatus::Success)
                    .unwrap()
            })
            .collect();

        let history = fx.editor.response_history().unwrap();
        assert_eq!(history.len(), 10);
        assert!(fx.editor.response(&ids[0]).is_none());
        assert_eq!(fx.editor.latest_response().unwrap().id, ids[10]);
        let order: Vec<&str> = history.iter().map(|e| e.id.as_str()).collect();
        let expected: Vec<&str> = ids[1..].iter().rev().map(String::as_str).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_clear_history_notifies() {
        let mut fx = fixture();
        fx.editor.record_response("oops", ResponseStatus::Error).unwrap();
        fx.editor.clear_response_history().unwrap();

        assert!(fx.editor.latest_response().is_none());
        assert_eq!(
            fx.notifier.last(),
            Some((Severity::Success, "Response history cleared".to_string()))
        );
    }
}
