//! Table rows and the trait the table algorithms are written against.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::BodyValue;
use crate::coercion::{TextCoercion, structured_to_flat, text_to_body};

/// A params or headers row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Row key. An empty key marks the trailing blank row.
    pub key: String,
    /// Row value.
    #[serde(default)]
    pub value: String,
    /// Whether the row takes part in the request.
    #[serde(default)]
    pub is_active: bool,
    /// Cached array index, rewritten after every structural mutation.
    #[serde(default)]
    pub position: usize,
}

impl Record {
    /// Creates an active row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_active: true,
            position: 0,
        }
    }

    /// Creates an inactive row.
    #[must_use]
    pub fn inactive(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            is_active: false,
            ..Self::new(key, value)
        }
    }
}

/// A body row carrying a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyRecord {
    /// Row key. An empty key marks the trailing blank row.
    pub key: String,
    /// Typed row value.
    #[serde(default)]
    pub value: BodyValue,
    /// Whether the row takes part in the request.
    #[serde(default)]
    pub is_active: bool,
    /// Cached array index, rewritten after every structural mutation.
    #[serde(default)]
    pub position: usize,
}

impl BodyRecord {
    /// Creates an active row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: BodyValue) -> Self {
        Self {
            key: key.into(),
            value,
            is_active: true,
            position: 0,
        }
    }
}

/// A row detached from any table: the item format shared by drag payloads
/// and the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableRow {
    /// A params/headers row.
    Plain(Record),
    /// A body row.
    Body(BodyRecord),
}

impl TableRow {
    /// The row key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Plain(r) => &r.key,
            Self::Body(r) => &r.key,
        }
    }

    /// Whether the row is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self {
            Self::Plain(r) => r.is_active,
            Self::Body(r) => r.is_active,
        }
    }

    /// The value in its flat text form.
    #[must_use]
    pub fn flat_value(&self) -> String {
        match self {
            Self::Plain(r) => r.value.clone(),
            Self::Body(r) => structured_to_flat(&r.value),
        }
    }

    /// Returns true for the blank trailing row.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.key().is_empty()
    }
}

impl From<Record> for TableRow {
    fn from(record: Record) -> Self {
        Self::Plain(record)
    }
}

impl From<BodyRecord> for TableRow {
    fn from(record: BodyRecord) -> Self {
        Self::Body(record)
    }
}

/// Operations the invariant maintainer and reorder engine need from a row.
pub trait Row: Clone + fmt::Debug {
    /// A fresh blank row with the correctly typed empty value.
    fn blank() -> Self;

    /// The row key.
    fn key(&self) -> &str;

    /// The cached position.
    fn position(&self) -> usize;

    /// Overwrites the cached position.
    fn set_position(&mut self, position: usize);

    /// Sets the active flag.
    fn set_active(&mut self, active: bool);

    /// The value serialized as JSON text, used for content identity.
    fn value_fingerprint(&self) -> String;

    /// Detaches a copy of this row.
    fn to_table_row(&self) -> TableRow;

    /// Builds a row of this type from a detached row, coercing the value when
    /// it crosses between body and non-body tables.
    fn from_table_row(row: TableRow, coercion: TextCoercion) -> Self;

    /// Returns true for the blank trailing row.
    fn is_sentinel(&self) -> bool {
        self.key().is_empty()
    }

    /// Content identity: same key and same serialized value.
    fn same_content(&self, other: &Self) -> bool {
        self.key() == other.key() && self.value_fingerprint() == other.value_fingerprint()
    }
}

impl Row for Record {
    fn blank() -> Self {
        Self::default()
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn value_fingerprint(&self) -> String {
        serde_json::to_string(&self.value).unwrap_or_default()
    }

    fn to_table_row(&self) -> TableRow {
        TableRow::Plain(self.clone())
    }

    fn from_table_row(row: TableRow, _coercion: TextCoercion) -> Self {
        match row {
            TableRow::Plain(record) => record,
            TableRow::Body(record) => Self {
                value: structured_to_flat(&record.value),
                key: record.key,
                is_active: record.is_active,
                position: record.position,
            },
        }
    }
}

impl Row for BodyRecord {
    fn blank() -> Self {
        Self::default()
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn value_fingerprint(&self) -> String {
        serde_json::to_string(&self.value).unwrap_or_default()
    }

    fn to_table_row(&self) -> TableRow {
        TableRow::Body(self.clone())
    }

    fn from_table_row(row: TableRow, coercion: TextCoercion) -> Self {
        match row {
            TableRow::Body(record) => record,
            TableRow::Plain(record) => Self {
                value: text_to_body(&record.value, coercion),
                key: record.key,
                is_active: record.is_active,
                position: record.position,
            },
        }
    }
}
