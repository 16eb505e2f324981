//! Row editing on the displayed request: CRUD, cell edits, selection, the
//! raw JSON view and URL edits.

use reqtab_domain::request::split_query;
use reqtab_domain::{
    CellField, CellValue, DomainError, TableKind, TableRow, TextCoercion, UndoEntry,
    flat_to_structured, raw,
};
use tracing::debug;

use super::Editor;
use crate::error::ApplicationResult;
use crate::ports::Severity;

impl Editor {
    /// Returns the index of the blank row of a table, appending it when it
    /// is missing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn create_row(&mut self, kind: TableKind) -> ApplicationResult<usize> {
        let mut table = self.active_table_mut(kind)?;
        table.maintain();
        let index = table.len().saturating_sub(1);
        debug!(%kind, index, "blank row ready");
        Ok(index)
    }

    /// Inserts a populated row just before the blank row. Values are
    /// converted to the table kind. Returns the row's index.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the row has no key.
    pub fn insert_row(&mut self, kind: TableKind, row: TableRow) -> ApplicationResult<usize> {
        if row.key().is_empty() {
            return self.reject(Severity::Warning, "Cannot insert a row without a key");
        }
        let mut table = self.active_table_mut(kind)?;
        table.maintain();
        let at = table.insert_rows(table.len().saturating_sub(1), vec![row], TextCoercion::Classify);
        table.maintain();
        debug!(%kind, index = at, "inserted row");
        Ok(at)
    }

    /// Deletes a row. A table left without rows gets a fresh blank row.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range.
    pub fn delete_row(&mut self, kind: TableKind, index: usize) -> ApplicationResult<TableRow> {
        let mut table = self.active_table_mut(kind)?;
        let removed = table.remove(index)?;
        table.maintain();
        self.selection.clear(kind);
        debug!(%kind, index, "deleted row");
        Ok(removed)
    }

    /// Direct edit of one cell. Records an undo entry.
    ///
    /// Writing a key activates the row; a key typed into the blank row turns
    /// it into a real row and a new blank row is appended.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range, and a validation
    /// error when a populated row's key would become empty.
    pub fn edit_cell(
        &mut self,
        kind: TableKind,
        index: usize,
        field: CellField,
        text: &str,
    ) -> ApplicationResult<()> {
        let request_id = self.active_id()?;
        let table = self.active_table(kind)?;
        let len = table.len();
        if index >= len {
            return Err(DomainError::RowOutOfRange { kind, index, len }.into());
        }
        if field == CellField::Key && text.is_empty() && !table.is_sentinel(index) {
            return self.reject(Severity::Warning, "Key cannot be empty");
        }

        let new = if kind.is_body() && field == CellField::Value {
            CellValue::Body(flat_to_structured(text))
        } else {
            CellValue::Text(text.to_string())
        };

        let mut table = self.active_table_mut(kind)?;
        let old = table.set_cell(index, field, text)?;
        table.maintain();

        self.undo.push(UndoEntry::Field {
            request_id,
            kind,
            index,
            field,
            old,
            new,
        });
        debug!(%kind, index, ?field, "edited cell");
        Ok(())
    }

    /// Sets the active flag of every row of a table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn set_all_active(&mut self, kind: TableKind, active: bool) -> ApplicationResult<()> {
        self.active_table_mut(kind)?.set_all_active(active);
        Ok(())
    }

    /// Flips the selection of a row. Returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// Returns an error for an out of range index or the blank row.
    pub fn toggle_selection(&mut self, kind: TableKind, index: usize) -> ApplicationResult<bool> {
        let table = self.active_table(kind)?;
        let len = table.len();
        if index >= len {
            return Err(DomainError::RowOutOfRange { kind, index, len }.into());
        }
        if table.is_sentinel(index) {
            return Err(DomainError::SentinelRow(kind).into());
        }
        Ok(self.selection.toggle(kind, index))
    }

    /// Selects every populated row, or clears the selection when all of
    /// them already are selected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn select_all(&mut self, kind: TableKind) -> ApplicationResult<()> {
        let table = self.active_table(kind)?;
        let selectable: Vec<usize> = (0..table.len()).filter(|&i| !table.is_sentinel(i)).collect();
        self.selection.toggle_all(kind, &selectable);
        Ok(())
    }

    /// Clears the selection of a table.
    pub fn clear_selection(&mut self, kind: TableKind) {
        self.selection.clear(kind);
    }

    /// Selected row indices of a table, ascending.
    #[must_use]
    pub fn selection(&self, kind: TableKind) -> Vec<usize> {
        self.selection.indices(kind)
    }

    /// The raw JSON view of a table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn raw_table(&self, kind: TableKind) -> ApplicationResult<String> {
        Ok(raw::render(self.active_table(kind)?))
    }

    /// Replaces a table with the rows of an edited raw JSON view. Returns the
    /// number of rows read.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the table untouched, when the
    /// text is not a JSON object.
    pub fn apply_raw_table(&mut self, kind: TableKind, text: &str) -> ApplicationResult<usize> {
        let rows = match raw::parse(kind, text) {
            Ok(rows) => rows,
            Err(e) => return self.reject(Severity::Warning, format!("Invalid JSON: {e}")),
        };
        let count = rows.len();

        let mut table = self.active_table_mut(kind)?;
        table.replace(rows, TextCoercion::Verbatim);
        table.maintain();
        self.selection.clear(kind);
        debug!(%kind, count, "applied raw table");
        Ok(count)
    }

    /// Direct edit of the URL. Records an undo entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] when no request is
    /// displayed.
    pub fn set_url(&mut self, text: &str) -> ApplicationResult<()> {
        let request = self.active_request_mut()?;
        let request_id = request.id.clone();
        let old = std::mem::replace(&mut request.url, text.to_string());
        self.undo.push(UndoEntry::Url {
            request_id,
            old,
            new: text.to_string(),
        });
        Ok(())
    }

    /// Moves the URL's query string into the params table. Returns the
    /// number of extracted params; a URL without query is left alone.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the URL cannot be parsed.
    pub fn extract_query_params(&mut self) -> ApplicationResult<usize> {
        let request = self.active_request_mut()?;
        let original = request.url.clone();
        let split = match split_query(&original) {
            Ok(Some(split)) => split,
            Ok(None) => return Ok(0),
            Err(e) => return self.reject(Severity::Warning, e.to_string()),
        };

        let request = self.active_request_mut()?;
        let request_id = request.id.clone();
        let count = split.params.len();
        request.url.clone_from(&split.url);
        let mut params = request.table_mut(TableKind::Params);
        params.replace(
            split.params.into_iter().map(TableRow::Plain).collect(),
            TextCoercion::Verbatim,
        );
        params.maintain();

        self.undo.push(UndoEntry::Url {
            request_id,
            old: original,
            new: split.url,
        });
        self.selection.clear(TableKind::Params);
        debug!(count, "extracted query params");
        Ok(count)
    }
}
