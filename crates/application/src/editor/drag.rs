//! Drag and drop: gesture lifecycle, drops on tables, drops on the sidebar
//! and tab strip, hover tracking and the deferred callbacks.

use reqtab_domain::{Request, TableKind, TextCoercion};
use tracing::{debug, info};

use super::Editor;
use crate::deferred::DeferredTask;
use crate::drag::{DragGesture, DragSource, DragState, DropContext, DropOutcome, DropTarget};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::Severity;

impl Editor {
    /// Starts a gesture on a row of the displayed request and returns its id.
    ///
    /// When two or more rows of the table are selected the gesture carries
    /// all of them; otherwise it carries the row under the pointer. The rows
    /// are copied now, later edits do not reach the gesture.
    ///
    /// # Errors
    ///
    /// Returns an error for an out of range index or the blank row.
    pub fn start_drag(&mut self, kind: TableKind, index: usize) -> ApplicationResult<u64> {
        let request_id = self.active_id()?;
        let table = self.active_table(kind)?;
        let pointer = table.snapshot(&[index])?;

        let len = table.len();
        let selected: Vec<usize> = self
            .selection
            .indices(kind)
            .into_iter()
            .filter(|&i| i < len && !table.is_sentinel(i))
            .collect();
        let (indices, rows) = if selected.len() >= 2 {
            let rows = table.snapshot(&selected)?;
            (selected, rows)
        } else {
            (vec![index], pointer)
        };

        let id = self.next_gesture;
        self.next_gesture += 1;
        self.drag.reset();
        self.drag.gesture = Some(DragGesture {
            id,
            rows,
            source: DragSource {
                request_id,
                kind,
                index,
                indices,
            },
        });
        self.drag.dragging = true;
        debug!(gesture = id, %kind, index, "drag started");
        Ok(id)
    }

    /// Ends the pointer gesture. Selections are cleared now; the snapshot
    /// and hover targets are cleared by a deferred task so that a drop
    /// handled afterwards still sees them.
    pub fn end_drag(&mut self) {
        self.selection.clear_all();
        self.drag.dragging = false;
        if let Some(gesture) = self.drag.gesture.as_ref().map(|g| g.id) {
            let now = self.ports.clock.now();
            self.deferred.schedule(
                now,
                self.settings.drag_cleanup_delay(),
                DeferredTask::ClearDrag { gesture },
            );
        }
    }

    /// Abandons the gesture without touching any table.
    pub fn cancel_drag(&mut self) {
        if let Some(gesture) = &self.drag.gesture {
            debug!(gesture = gesture.id, "drag cancelled");
        }
        self.drag.reset();
    }

    /// Drops the gesture on a table body.
    ///
    /// A drop in the list the drag started from reorders it. Anything else
    /// moves the rows: they are inserted in the destination (the hovered
    /// request and tab when set, else the displayed request and the target
    /// table), removed from the source by content, and the display follows
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Cancelled`] when no gesture is in flight.
    pub fn drop_within_table(&mut self, target: DropTarget) -> ApplicationResult<DropOutcome> {
        let Some(gesture) = self.drag.gesture.clone() else {
            return Err(ApplicationError::Cancelled);
        };
        let source = &gesture.source;
        let dest_request = match self.drag.target_request.clone() {
            Some(id) => id,
            None => self.active_id()?,
        };
        let dest_kind = self.drag.target_tab.unwrap_or(target.kind);

        let same_table = dest_request == source.request_id && dest_kind == source.kind;
        if (target.same_container && source.kind == target.kind) || same_table {
            let mut table = self.request_mut(&source.request_id)?.table_mut(source.kind);
            let at = if gesture.is_multi() {
                table.move_block(&source.indices, target.index)
            } else {
                table.move_item(source.index, target.index);
                target.index
            };
            table.maintain();
            let at = at.min(table.len().saturating_sub(1 + gesture.rows.len()));
            info!(gesture = gesture.id, kind = %source.kind, count = gesture.rows.len(), at, "rows reordered");
            self.autosave();
            return Ok(DropOutcome::Reordered {
                kind: source.kind,
                at,
            });
        }

        // The source must still exist before anything is inserted.
        self.request_mut(&source.request_id)?;

        let count = gesture.rows.len();
        let mut dest = self.request_mut(&dest_request)?.table_mut(dest_kind);
        dest.insert_rows(target.index, gesture.rows.clone(), TextCoercion::Verbatim);
        dest.maintain();

        let mut origin = self.request_mut(&source.request_id)?.table_mut(source.kind);
        let removed = origin.remove_matching(&gesture.rows);
        origin.maintain();
        debug!(
            gesture = gesture.id,
            from = %source.kind,
            to = %dest_kind,
            count,
            removed,
            "rows moved"
        );

        if let Some(request_id) = self.drag.target_request.take() {
            self.activate_by_id(&request_id);
        }
        if let Some(tab) = self.drag.target_tab.take() {
            self.active_tab = tab;
        }

        info!(gesture = gesture.id, request_id = %dest_request, kind = %dest_kind, count, "rows dropped");
        self.autosave();
        Ok(DropOutcome::Moved {
            request_id: dest_request,
            kind: dest_kind,
            count,
        })
    }

    /// Drops the gesture outside the tables. Rows are copied; the source
    /// table is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Cancelled`] when no gesture is in flight,
    /// [`ApplicationError::NotFound`] for an unknown target and a validation
    /// error when rows would cross between the body tab and a plain tab.
    pub fn drop_cross_context(&mut self, context: DropContext) -> ApplicationResult<DropOutcome> {
        let Some(gesture) = self.drag.gesture.clone() else {
            return Err(ApplicationError::Cancelled);
        };
        let source_kind = gesture.source.kind;
        let count = gesture.rows.len();

        let outcome = match context {
            DropContext::Request { request_id } => {
                let mut table = self.request_mut(&request_id)?.table_mut(source_kind);
                table.append_rows(gesture.rows, TextCoercion::Verbatim);
                table.maintain();
                if self.active.as_ref().is_none_or(|a| a.request_id != request_id) {
                    self.activate_by_id(&request_id);
                }
                DropOutcome::Copied {
                    request_id,
                    kind: source_kind,
                    count,
                }
            }
            DropContext::Tab { kind } => {
                if source_kind.is_body() != kind.is_body() {
                    return self.reject(
                        Severity::Warning,
                        format!("Cannot drop {source_kind} item to {kind} tab"),
                    );
                }
                let request_id = self.active_id()?;
                let mut table = self.active_table_mut(kind)?;
                table.append_rows(gesture.rows, TextCoercion::Verbatim);
                table.maintain();
                self.active_tab = kind;
                DropOutcome::Copied {
                    request_id,
                    kind,
                    count,
                }
            }
            DropContext::Collection { collection_id } => {
                let capacity = self.settings.history_capacity;
                let collection = self
                    .collections
                    .iter_mut()
                    .find(|c| c.id == collection_id)
                    .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?;
                let mut request = Request::from_rows(
                    format!("New request {}", collection.requests.len() + 1),
                    source_kind,
                    gesture.rows,
                );
                request.responses.set_capacity(capacity);
                let request_id = request.id.clone();
                collection.requests.push(request);
                self.activate(&collection_id, &request_id)?;
                DropOutcome::CreatedRequest {
                    collection_id,
                    request_id,
                }
            }
        };

        info!(gesture = gesture.id, ?outcome, "rows dropped outside tables");
        self.autosave();
        Ok(outcome)
    }

    /// The pointer entered a request in the sidebar.
    pub fn hover_request(&mut self, request_id: &str) {
        self.drag.hovered_request = Some(request_id.to_string());
        if self.drag.dragging {
            self.drag.target_request = Some(request_id.to_string());
            let now = self.ports.clock.now();
            self.deferred.schedule(
                now,
                self.settings.hover_preview_delay(),
                DeferredTask::PreviewRequest {
                    request_id: request_id.to_string(),
                },
            );
        }
    }

    /// The pointer left a request in the sidebar.
    pub fn leave_request(&mut self, request_id: &str) {
        if self.drag.hovered_request.as_deref() == Some(request_id) {
            self.drag.hovered_request = None;
        }
    }

    /// The pointer entered a table tab.
    pub fn hover_tab(&mut self, tab: TableKind) {
        if self.drag.dragging {
            self.drag.target_tab = Some(tab);
            let now = self.ports.clock.now();
            self.deferred.schedule(
                now,
                self.settings.hover_preview_delay(),
                DeferredTask::SelectTab { tab },
            );
        }
    }

    /// The pointer entered a collection in the sidebar.
    pub fn hover_collection(&mut self, collection_id: &str) {
        if self.drag.dragging {
            self.drag.hovered_collection = Some(collection_id.to_string());
        }
    }

    /// The pointer left a collection in the sidebar.
    pub fn leave_collection(&mut self, collection_id: &str) {
        if self.drag.hovered_collection.as_deref() == Some(collection_id) {
            self.drag.hovered_collection = None;
        }
    }

    /// Runs every deferred task that is due. Returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let now = self.ports.clock.now();
        let due = self.deferred.take_due(now);
        let count = due.len();
        for task in due {
            match task {
                DeferredTask::ClearDrag { gesture } => {
                    if self.drag.gesture.as_ref().is_some_and(|g| g.id == gesture) {
                        self.drag.reset();
                        debug!(gesture, "drag state cleared");
                    }
                }
                DeferredTask::PreviewRequest { request_id } => {
                    if !self.activate_by_id(&request_id) {
                        debug!(%request_id, "hovered request is gone");
                    }
                }
                DeferredTask::SelectTab { tab } => self.active_tab = tab,
            }
        }
        count
    }

    /// Current drag state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// The gesture in flight or awaiting cleanup.
    #[must_use]
    pub const fn gesture(&self) -> Option<&DragGesture> {
        self.drag.gesture.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use crate::drag::{DropContext, DropOutcome, DropTarget};
    use crate::error::ApplicationError;
    use crate::ports::Severity;
    use crate::testing::Fixture;
    use pretty_assertions::assert_eq;
    use reqtab_domain::{BodyValue, Record, TableKind, TableRow};

    fn fixture_with_params(keys: &[&str]) -> (Fixture, String) {
        let mut fx = Fixture::new();
        let collection_id = fx.editor.create_collection();
        fx.editor.create_request(&collection_id).unwrap();
        for key in keys {
            fx.editor
                .insert_row(TableKind::Params, TableRow::Plain(Record::new(*key, key.to_lowercase())))
                .unwrap();
        }
        (fx, collection_id)
    }

    fn keys(fx: &Fixture, kind: TableKind) -> Vec<String> {
        fx.editor.active_request().unwrap().table(kind).keys()
    }

    fn within(kind: TableKind, index: usize) -> DropTarget {
        DropTarget {
            kind,
            index,
            same_container: true,
        }
    }

    fn across(kind: TableKind, index: usize) -> DropTarget {
        DropTarget {
            kind,
            index,
            same_container: false,
        }
    }

    #[test]
    fn test_single_row_reorder() {
        let (mut fx, _) = fixture_with_params(&["A", "B", "C"]);
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        let outcome = fx.editor.drop_within_table(within(TableKind::Params, 2)).unwrap();
        fx.editor.end_drag();

        assert_eq!(outcome, DropOutcome::Reordered { kind: TableKind::Params, at: 2 });
        assert_eq!(keys(&fx, TableKind::Params), vec!["B", "C", "A", ""]);
        assert!(fx.editor.active_request().unwrap().is_settled());
    }

    #[test]
    fn test_multi_row_reorder_corrects_drop_index() {
        let (mut fx, _) = fixture_with_params(&["A", "B", "C", "D", "E"]);
        fx.editor.toggle_selection(TableKind::Params, 0).unwrap();
        fx.editor.toggle_selection(TableKind::Params, 2).unwrap();
        fx.editor.start_drag(TableKind::Params, 2).unwrap();
        assert!(fx.editor.gesture().unwrap().is_multi());

        let outcome = fx.editor.drop_within_table(within(TableKind::Params, 3)).unwrap();
        assert_eq!(outcome, DropOutcome::Reordered { kind: TableKind::Params, at: 1 });
        assert_eq!(keys(&fx, TableKind::Params), vec!["B", "A", "C", "D", "E", ""]);
        assert!(fx.editor.active_request().unwrap().is_settled());
    }

    #[test]
    fn test_single_selection_drags_pointer_row() {
        let (mut fx, _) = fixture_with_params(&["A", "B", "C"]);
        fx.editor.toggle_selection(TableKind::Params, 0).unwrap();
        fx.editor.start_drag(TableKind::Params, 1).unwrap();

        let gesture = fx.editor.gesture().unwrap();
        assert_eq!(gesture.source.indices, vec![1]);
        assert_eq!(gesture.rows[0].key(), "B");
    }

    #[test]
    fn test_blank_row_cannot_be_dragged() {
        let (mut fx, _) = fixture_with_params(&["A"]);
        assert!(matches!(
            fx.editor.start_drag(TableKind::Params, 1),
            Err(ApplicationError::Domain(_))
        ));
        assert!(fx.editor.gesture().is_none());
    }

    #[test]
    fn test_drag_snapshot_is_detached() {
        let (mut fx, _) = fixture_with_params(&["A"]);
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        fx.editor
            .edit_cell(TableKind::Params, 0, reqtab_domain::CellField::Value, "changed")
            .unwrap();

        assert_eq!(fx.editor.gesture().unwrap().rows[0].flat_value(), "a");
    }

    #[test]
    fn test_move_params_row_into_body() {
        let (mut fx, _) = fixture_with_params(&["A", "B"]);
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        let outcome = fx.editor.drop_within_table(across(TableKind::Body, 0)).unwrap();

        assert!(matches!(outcome, DropOutcome::Moved { kind: TableKind::Body, count: 1, .. }));
        let request = fx.editor.active_request().unwrap();
        assert_eq!(keys(&fx, TableKind::Params), vec!["B", ""]);
        assert_eq!(keys(&fx, TableKind::Body), vec!["A", ""]);
        assert_eq!(request.body[0].value, BodyValue::text("a"));
        assert!(request.is_settled());
    }

    #[test]
    fn test_move_body_row_into_headers_flattens() {
        let mut fx = Fixture::new();
        let collection_id = fx.editor.create_collection();
        fx.editor.create_request(&collection_id).unwrap();
        fx.editor
            .apply_raw_table(TableKind::Body, r#"{"ids": [1, 2], "n": 5}"#)
            .unwrap();

        fx.editor.toggle_selection(TableKind::Body, 0).unwrap();
        fx.editor.toggle_selection(TableKind::Body, 1).unwrap();
        fx.editor.start_drag(TableKind::Body, 0).unwrap();
        fx.editor.drop_within_table(across(TableKind::Headers, 1)).unwrap();

        let request = fx.editor.active_request().unwrap();
        assert_eq!(request.headers[1].key, "ids");
        assert_eq!(request.headers[1].value, "[1,2]");
        assert_eq!(request.headers[2].value, "5");
        assert_eq!(keys(&fx, TableKind::Body), vec![""]);
        assert!(request.is_settled());
    }

    #[test]
    fn test_move_into_hovered_request() {
        let (mut fx, collection_id) = fixture_with_params(&["A", "B"]);
        let source_id = fx.editor.active().unwrap().request_id.clone();
        let target_id = fx.editor.create_request(&collection_id).unwrap();
        fx.editor.activate(&collection_id, &source_id).unwrap();

        fx.editor.start_drag(TableKind::Params, 1).unwrap();
        fx.editor.hover_request(&target_id);
        fx.editor.drop_within_table(across(TableKind::Params, 0)).unwrap();
        fx.editor.end_drag();

        assert_eq!(fx.editor.active().unwrap().request_id, target_id);
        assert_eq!(keys(&fx, TableKind::Params), vec!["B", ""]);
        fx.editor.activate(&collection_id, &source_id).unwrap();
        assert_eq!(keys(&fx, TableKind::Params), vec!["A", ""]);
    }

    #[test]
    fn test_drop_without_gesture_is_cancelled() {
        let (mut fx, _) = fixture_with_params(&["A"]);
        assert_eq!(
            fx.editor.drop_within_table(within(TableKind::Params, 0)),
            Err(ApplicationError::Cancelled)
        );
    }

    #[test]
    fn test_cancel_leaves_tables_untouched() {
        let (mut fx, _) = fixture_with_params(&["A", "B"]);
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        fx.editor.cancel_drag();

        assert!(fx.editor.gesture().is_none());
        assert_eq!(keys(&fx, TableKind::Params), vec!["A", "B", ""]);
    }

    #[test]
    fn test_end_drag_clears_state_on_deferred_tick() {
        let (mut fx, _) = fixture_with_params(&["A"]);
        fx.editor.toggle_selection(TableKind::Params, 0).unwrap();
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        fx.editor.hover_tab(TableKind::Headers);
        fx.editor.end_drag();

        assert!(fx.editor.selection(TableKind::Params).is_empty());
        assert!(fx.editor.gesture().is_some());
        assert_eq!(fx.editor.drag_state().target_tab, Some(TableKind::Headers));

        fx.clock.advance_ms(100);
        fx.editor.run_deferred();
        assert!(fx.editor.gesture().is_none());
        assert_eq!(fx.editor.drag_state().target_tab, None);
    }

    #[test]
    fn test_stale_cleanup_spares_newer_gesture() {
        let (mut fx, _) = fixture_with_params(&["A", "B"]);
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        fx.editor.end_drag();
        let second = fx.editor.start_drag(TableKind::Params, 1).unwrap();

        fx.clock.advance_ms(150);
        fx.editor.run_deferred();
        assert_eq!(fx.editor.gesture().map(|g| g.id), Some(second));
    }

    #[test]
    fn test_hover_preview_switches_after_delay() {
        let (mut fx, collection_id) = fixture_with_params(&["A"]);
        let source_id = fx.editor.active().unwrap().request_id.clone();
        let target_id = fx.editor.create_request(&collection_id).unwrap();
        fx.editor.activate(&collection_id, &source_id).unwrap();

        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        fx.editor.hover_request(&target_id);
        fx.clock.advance_ms(199);
        assert_eq!(fx.editor.run_deferred(), 0);
        fx.clock.advance_ms(1);
        assert_eq!(fx.editor.run_deferred(), 1);
        assert_eq!(fx.editor.active().unwrap().request_id, target_id);
    }

    #[test]
    fn test_hover_preview_of_deleted_request_is_ignored() {
        let (mut fx, collection_id) = fixture_with_params(&["A"]);
        let source_id = fx.editor.active().unwrap().request_id.clone();
        let target_id = fx.editor.create_request(&collection_id).unwrap();
        fx.editor.activate(&collection_id, &source_id).unwrap();

        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        fx.editor.hover_request(&target_id);
        fx.editor.delete_request(&collection_id, 1).unwrap();
        fx.clock.advance_ms(200);
        fx.editor.run_deferred();

        assert!(fx.editor.active().is_none());
    }

    #[test]
    fn test_hover_without_drag_only_tracks_pointer() {
        let (mut fx, _) = fixture_with_params(&["A"]);
        fx.editor.hover_request("r1");
        fx.editor.hover_tab(TableKind::Body);
        fx.editor.hover_collection("c1");

        let state = fx.editor.drag_state();
        assert_eq!(state.hovered_request.as_deref(), Some("r1"));
        assert_eq!(state.target_request, None);
        assert_eq!(state.target_tab, None);
        assert_eq!(state.hovered_collection, None);

        fx.editor.leave_request("r1");
        assert_eq!(fx.editor.drag_state().hovered_request, None);
    }

    #[test]
    fn test_drop_on_request_copies_rows() {
        let (mut fx, collection_id) = fixture_with_params(&["A", "B"]);
        let source_id = fx.editor.active().unwrap().request_id.clone();
        let target_id = fx.editor.create_request(&collection_id).unwrap();
        fx.editor.activate(&collection_id, &source_id).unwrap();

        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        let outcome = fx
            .editor
            .drop_cross_context(DropContext::Request { request_id: target_id.clone() })
            .unwrap();

        assert!(matches!(outcome, DropOutcome::Copied { count: 1, .. }));
        assert_eq!(fx.editor.active().unwrap().request_id, target_id);
        assert_eq!(keys(&fx, TableKind::Params), vec!["A", ""]);
        fx.editor.activate(&collection_id, &source_id).unwrap();
        assert_eq!(keys(&fx, TableKind::Params), vec!["A", "B", ""]);
    }

    #[test]
    fn test_tab_drop_rejects_body_mismatch() {
        let (mut fx, _) = fixture_with_params(&["A"]);
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        let result = fx.editor.drop_cross_context(DropContext::Tab { kind: TableKind::Body });

        assert!(matches!(result, Err(ApplicationError::Validation(_))));
        assert_eq!(
            fx.notifier.last(),
            Some((Severity::Warning, "Cannot drop params item to body tab".to_string()))
        );
        assert_eq!(keys(&fx, TableKind::Body), vec![""]);
        assert_eq!(fx.editor.active_tab(), TableKind::Params);
    }

    #[test]
    fn test_tab_drop_copies_and_switches_tab() {
        let (mut fx, _) = fixture_with_params(&["A"]);
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        fx.editor
            .drop_cross_context(DropContext::Tab { kind: TableKind::Headers })
            .unwrap();

        assert_eq!(fx.editor.active_tab(), TableKind::Headers);
        let headers = keys(&fx, TableKind::Headers);
        assert_eq!(headers[headers.len() - 2], "A");
        assert_eq!(keys(&fx, TableKind::Params), vec!["A", ""]);
    }

    #[test]
    fn test_collection_drop_creates_post_request() {
        let (mut fx, collection_id) = fixture_with_params(&["A", "B"]);
        fx.editor.select_all(TableKind::Params).unwrap();
        fx.editor.start_drag(TableKind::Params, 0).unwrap();
        let outcome = fx
            .editor
            .drop_cross_context(DropContext::Collection { collection_id: collection_id.clone() })
            .unwrap();

        let DropOutcome::CreatedRequest { request_id, .. } = outcome else {
            panic!("expected a new request");
        };
        let request = fx.editor.active_request().unwrap();
        assert_eq!(request.id, request_id);
        assert_eq!(request.title, "New request 2");
        assert_eq!(request.method, reqtab_domain::HttpMethod::Post);
        assert_eq!(keys(&fx, TableKind::Params), vec!["A", "B", ""]);
        assert!(request.is_settled());
    }
}
