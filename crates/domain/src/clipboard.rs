//! Clipboard payloads shared by the editable tables and the generic
//! visualization tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::{Record, TableRow};

/// Text copied for a nested table cell.
pub const NESTED_TABLE_PLACEHOLDER: &str = "[Nested Table]";

/// One row copied from a generic table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowData {
    /// Row index in the table it was copied from.
    pub row_index: usize,
    /// Cell texts, left to right.
    pub columns: Vec<String>,
}

/// A cell of a generic table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    /// Plain text.
    Text(String),
    /// A table nested inside the cell.
    Nested(TableView),
}

impl TableCell {
    /// The text copied for this cell.
    #[must_use]
    pub fn copy_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Nested(_) => NESTED_TABLE_PLACEHOLDER,
        }
    }
}

/// A read-only table produced from structured data (CSV, JSON, XML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Column labels.
    #[serde(default)]
    pub headers: Vec<String>,
    /// Rows of cells.
    #[serde(default)]
    pub rows: Vec<Vec<TableCell>>,
}

impl TableView {
    /// A row can be selected when it has a non-blank text cell.
    #[must_use]
    pub fn is_row_selectable(&self, index: usize) -> bool {
        self.rows.get(index).is_some_and(|row| {
            row.iter()
                .any(|cell| matches!(cell, TableCell::Text(text) if !text.trim().is_empty()))
        })
    }

    /// Indices of every selectable row.
    #[must_use]
    pub fn selectable_rows(&self) -> Vec<usize> {
        (0..self.rows.len()).filter(|&i| self.is_row_selectable(i)).collect()
    }

    /// Copies the selectable rows among `selected`, in table order.
    #[must_use]
    pub fn snapshot(&self, selected: &[usize]) -> Vec<TableRowData> {
        let mut indices: Vec<usize> = selected
            .iter()
            .copied()
            .filter(|&i| self.is_row_selectable(i))
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .map(|row_index| TableRowData {
                row_index,
                columns: self.rows[row_index]
                    .iter()
                    .map(|cell| cell.copy_text().to_string())
                    .collect(),
            })
            .collect()
    }

    /// Appends copied rows as text cells. Returns the number of rows added.
    pub fn append(&mut self, rows: Vec<TableRowData>) -> usize {
        let count = rows.len();
        self.rows.extend(
            rows.into_iter()
                .map(|row| row.columns.into_iter().map(TableCell::Text).collect()),
        );
        count
    }
}

/// What a paste is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteTarget {
    /// A generic visualization table.
    Table,
    /// A params/headers/body table.
    EditableTable,
}

/// The copied rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    /// Rows of a generic table.
    TableRows {
        /// Copied rows.
        rows: Vec<TableRowData>,
        /// Column labels of the source table.
        headers: Vec<String>,
    },
    /// Rows of an editable table.
    KeyValuePairs(Vec<TableRow>),
}

/// The value held by the session clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Copied rows.
    pub content: ClipboardContent,
    /// Label of the component the rows were copied from.
    pub source: String,
    /// When the copy happened.
    pub timestamp: DateTime<Utc>,
}

impl ClipboardPayload {
    /// Creates a payload.
    #[must_use]
    pub fn new(content: ClipboardContent, source: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content,
            source: source.into(),
            timestamp,
        }
    }

    /// Number of copied rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.content {
            ClipboardContent::TableRows { rows, .. } => rows.len(),
            ClipboardContent::KeyValuePairs(rows) => rows.len(),
        }
    }

    /// Returns true when no row was copied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable text written to the system clipboard: tab-separated
    /// lines for generic rows, pretty JSON for key-value rows.
    #[must_use]
    pub fn system_text(&self) -> String {
        match &self.content {
            ClipboardContent::TableRows { rows, headers } => {
                let mut lines = Vec::with_capacity(rows.len() + 1);
                if !headers.is_empty() {
                    lines.push(headers.join("\t"));
                }
                lines.extend(rows.iter().map(|row| row.columns.join("\t")));
                lines.join("\n")
            }
            ClipboardContent::KeyValuePairs(rows) => {
                serde_json::to_string_pretty(rows).unwrap_or_default()
            }
        }
    }

    /// The copied rows as key-value rows.
    ///
    /// Generic rows use their first column as key and second as value; an
    /// empty first column becomes `row_<n>`.
    #[must_use]
    pub fn key_value_rows(&self) -> Vec<TableRow> {
        match &self.content {
            ClipboardContent::KeyValuePairs(rows) => rows.clone(),
            ClipboardContent::TableRows { rows, .. } => rows
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    let key = row
                        .columns
                        .first()
                        .filter(|key| !key.is_empty())
                        .cloned()
                        .unwrap_or_else(|| format!("row_{}", index + 1));
                    TableRow::Plain(Record {
                        key,
                        value: row.columns.get(1).cloned().unwrap_or_default(),
                        is_active: true,
                        position: index,
                    })
                })
                .collect(),
        }
    }

    /// The copied rows as generic two-column rows.
    #[must_use]
    pub fn table_rows(&self) -> Vec<TableRowData> {
        match &self.content {
            ClipboardContent::TableRows { rows, .. } => rows.clone(),
            ClipboardContent::KeyValuePairs(rows) => rows
                .iter()
                .enumerate()
                .map(|(row_index, row)| TableRowData {
                    row_index,
                    columns: vec![row.key().to_string(), row.flat_value()],
                })
                .collect(),
        }
    }
}

/// The session clipboard: at most one payload, last write wins.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    payload: Option<ClipboardPayload>,
    fallback_text: Option<String>,
}

impl Clipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            payload: None,
            fallback_text: None,
        }
    }

    /// Replaces the held payload.
    pub fn set(&mut self, payload: ClipboardPayload) {
        self.payload = Some(payload);
        self.fallback_text = None;
    }

    /// The held payload.
    #[must_use]
    pub const fn payload(&self) -> Option<&ClipboardPayload> {
        self.payload.as_ref()
    }

    /// Returns true when a payload is held.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.payload.is_some()
    }

    /// Drops the payload and any fallback text.
    pub fn clear(&mut self) {
        self.payload = None;
        self.fallback_text = None;
    }

    /// Whether the held payload can be pasted into `target`. Both payload
    /// kinds convert into both targets.
    #[must_use]
    pub fn is_compatible_with(&self, target: PasteTarget) -> bool {
        self.payload.is_some() && matches!(target, PasteTarget::Table | PasteTarget::EditableTable)
    }

    /// Keeps the system text locally when the system clipboard rejected it.
    pub fn keep_fallback(&mut self, text: String) {
        self.fallback_text = Some(text);
    }

    /// Text kept by the local fallback copy.
    #[must_use]
    pub fn fallback_text(&self) -> Option<&str> {
        self.fallback_text.as_deref()
    }
}
