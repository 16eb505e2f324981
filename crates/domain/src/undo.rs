//! Undo entries for direct edits.
//!
//! Only text edits (cells, titles, URL) are recorded; drags and pastes are
//! not.

use crate::collection::{Collection, find_request_mut};
use crate::error::DomainResult;
use crate::table::{CellField, CellValue, TableKind};

/// One reversible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    /// URL text change.
    Url {
        /// Owning request.
        request_id: String,
        /// Text before the edit.
        old: String,
        /// Text after the edit.
        new: String,
    },
    /// Request title change.
    RequestTitle {
        /// Renamed request.
        request_id: String,
        /// Title before the edit.
        old: String,
        /// Title after the edit.
        new: String,
    },
    /// Collection title change.
    CollectionTitle {
        /// Renamed collection.
        collection_id: String,
        /// Title before the edit.
        old: String,
        /// Title after the edit.
        new: String,
    },
    /// Table cell change.
    Field {
        /// Owning request.
        request_id: String,
        /// Edited table.
        kind: TableKind,
        /// Row index at edit time.
        index: usize,
        /// Edited column.
        field: CellField,
        /// Content before the edit.
        old: CellValue,
        /// Content after the edit.
        new: CellValue,
    },
}

impl UndoEntry {
    /// Writes the old value back into `collections`.
    ///
    /// Returns `Ok(false)` when the addressed collection or request no longer
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the addressed row index is out of range.
    pub fn revert(self, collections: &mut [Collection]) -> DomainResult<bool> {
        match self {
            Self::Url { request_id, old, .. } => {
                let Some(request) = find_request_mut(collections, &request_id) else {
                    return Ok(false);
                };
                request.url = old;
            }
            Self::RequestTitle { request_id, old, .. } => {
                let Some(request) = find_request_mut(collections, &request_id) else {
                    return Ok(false);
                };
                request.title = old;
            }
            Self::CollectionTitle { collection_id, old, .. } => {
                let Some(collection) = collections.iter_mut().find(|c| c.id == collection_id) else {
                    return Ok(false);
                };
                collection.title = old;
            }
            Self::Field { request_id, kind, index, field, old, .. } => {
                let Some(request) = find_request_mut(collections, &request_id) else {
                    return Ok(false);
                };
                let mut table = request.table_mut(kind);
                table.restore_cell(index, field, old)?;
                table.maintain();
            }
        }
        Ok(true)
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Url { .. } => "url",
            Self::RequestTitle { .. } => "requestTitle",
            Self::CollectionTitle { .. } => "collectionTitle",
            Self::Field { kind: TableKind::Params, .. } => "param",
            Self::Field { kind: TableKind::Headers, .. } => "header",
            Self::Field { kind: TableKind::Body, .. } => "body",
        }
    }
}

/// Last-in-first-out list of edits, unbounded for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    entries: Vec<UndoEntry>,
}

impl UndoStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Records an edit.
    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    /// Removes and returns the most recent edit.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    /// The most recent edit.
    #[must_use]
    pub fn peek(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    /// Number of recorded edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing can be undone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
