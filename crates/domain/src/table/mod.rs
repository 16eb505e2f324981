//! Key-value tables: rows, invariants and reordering.

mod body_value;
pub mod invariant;
mod record;
pub mod reorder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use body_value::BodyValue;
pub use record::{BodyRecord, Record, Row, TableRow};

use crate::coercion::{TextCoercion, flat_to_structured, structured_to_flat};
use crate::error::{DomainError, DomainResult};

/// The three tables of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Query parameters.
    Params,
    /// Request headers.
    Headers,
    /// Body fields.
    Body,
}

impl TableKind {
    /// All table kinds in tab order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Params, Self::Headers, Self::Body]
    }

    /// Returns the kind as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Headers => "headers",
            Self::Body => "body",
        }
    }

    /// Returns true for the body table.
    #[must_use]
    pub const fn is_body(self) -> bool {
        matches!(self, Self::Body)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "params" | "param" => Ok(Self::Params),
            "headers" | "header" => Ok(Self::Headers),
            "body" => Ok(Self::Body),
            _ => Err(DomainError::InvalidIdentifier(format!("table kind `{s}`"))),
        }
    }
}

/// A cell column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellField {
    /// The key column.
    Key,
    /// The value column.
    Value,
}

/// The content of a single cell, as recorded for undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A key, or a params/headers value.
    Text(String),
    /// A body value.
    Body(BodyValue),
}

impl CellValue {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Body(value) => structured_to_flat(&value),
        }
    }

    fn into_body(self) -> BodyValue {
        match self {
            Self::Text(text) => BodyValue::String(text),
            Self::Body(value) => value,
        }
    }
}

/// Mutable view of one table of a request, whatever its row type.
#[derive(Debug)]
pub enum TableMut<'a> {
    /// Params or headers.
    Plain {
        /// Which of the two.
        kind: TableKind,
        /// The rows.
        rows: &'a mut Vec<Record>,
    },
    /// The body table.
    Body(&'a mut Vec<BodyRecord>),
}

/// Read-only view of one table of a request.
#[derive(Debug, Clone, Copy)]
pub enum TableRef<'a> {
    /// Params or headers.
    Plain {
        /// Which of the two.
        kind: TableKind,
        /// The rows.
        rows: &'a [Record],
    },
    /// The body table.
    Body(&'a [BodyRecord]),
}

macro_rules! with_rows {
    (ref $table:expr, $rows:ident => $body:expr) => {
        match $table {
            TableMut::Plain { rows, .. } => {
                let $rows = &**rows;
                $body
            }
            TableMut::Body(rows) => {
                let $rows = &**rows;
                $body
            }
        }
    };
    (mut $table:expr, $rows:ident => $body:expr) => {
        match $table {
            TableMut::Plain { rows, .. } => {
                let $rows = &mut **rows;
                $body
            }
            TableMut::Body(rows) => {
                let $rows = &mut **rows;
                $body
            }
        }
    };
}

macro_rules! with_rows_ref {
    ($table:expr, $rows:ident => $body:expr) => {
        match $table {
            TableRef::Plain { rows, .. } => {
                let $rows = &**rows;
                $body
            }
            TableRef::Body(rows) => {
                let $rows = &**rows;
                $body
            }
        }
    };
}

impl TableRef<'_> {
    /// The table kind.
    #[must_use]
    pub const fn kind(&self) -> TableKind {
        match self {
            Self::Plain { kind, .. } => *kind,
            Self::Body(_) => TableKind::Body,
        }
    }

    /// Number of rows, blank row included.
    #[must_use]
    pub fn len(&self) -> usize {
        with_rows_ref!(self, rows => rows.len())
    }

    /// Returns true when the table holds no row at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detached copy of the row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<TableRow> {
        with_rows_ref!(self, rows => rows.get(index).map(Row::to_table_row))
    }

    /// Detached copies of every row.
    #[must_use]
    pub fn rows(&self) -> Vec<TableRow> {
        with_rows_ref!(self, rows => rows.iter().map(Row::to_table_row).collect())
    }

    /// Detached copies of the rows at `indices`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error when an index is out of range or addresses the blank
    /// row.
    pub fn snapshot(&self, indices: &[usize]) -> DomainResult<Vec<TableRow>> {
        let kind = self.kind();
        let len = self.len();
        with_rows_ref!(self, rows => indices
            .iter()
            .map(|&index| {
                let row = rows
                    .get(index)
                    .ok_or(DomainError::RowOutOfRange { kind, index, len })?;
                if row.is_sentinel() {
                    return Err(DomainError::SentinelRow(kind));
                }
                Ok(row.to_table_row())
            })
            .collect())
    }

    /// Returns true when the row at `index` is the blank row.
    #[must_use]
    pub fn is_sentinel(&self, index: usize) -> bool {
        with_rows_ref!(self, rows => rows.get(index).is_some_and(Row::is_sentinel))
    }

    /// Keys in table order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        with_rows_ref!(self, rows => rows.iter().map(|r| r.key().to_string()).collect())
    }

    /// Returns true when positions and the blank row are settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        with_rows_ref!(self, rows => invariant::is_settled(rows))
    }
}

impl TableMut<'_> {
    /// The table kind.
    #[must_use]
    pub const fn kind(&self) -> TableKind {
        match self {
            Self::Plain { kind, .. } => *kind,
            Self::Body(_) => TableKind::Body,
        }
    }

    /// Number of rows, blank row included.
    #[must_use]
    pub fn len(&self) -> usize {
        with_rows!(ref self, rows => rows.len())
    }

    /// Returns true when the table holds no row at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restores positions and the trailing blank row.
    pub fn maintain(&mut self) {
        with_rows!(mut self, rows => invariant::maintain(rows));
    }

    /// Moves one row.
    pub fn move_item(&mut self, from: usize, to: usize) {
        with_rows!(mut self, rows => reorder::move_item(rows, from, to));
    }

    /// Moves several rows as a block; returns the insertion index.
    pub fn move_block(&mut self, indices: &[usize], drop_index: usize) -> usize {
        with_rows!(mut self, rows => reorder::move_block(rows, indices, drop_index))
    }

    /// Inserts converted copies of `incoming` at `index` and renumbers the
    /// inserted block and everything after it. The index is clamped so the
    /// block never lands after the trailing blank row, which keeps whatever
    /// was typed into it.
    ///
    /// Returns the index the block starts at.
    pub fn insert_rows(
        &mut self,
        index: usize,
        incoming: Vec<TableRow>,
        coercion: TextCoercion,
    ) -> usize {
        with_rows!(mut self, rows => {
            let blank_tail = rows.last().is_some_and(Row::is_sentinel);
            let at = index.min(rows.len() - usize::from(blank_tail));
            rows.splice(
                at..at,
                incoming.into_iter().map(|row| Row::from_table_row(row, coercion)),
            );
            for (offset, row) in rows.iter_mut().enumerate().skip(at) {
                row.set_position(offset);
            }
            at
        })
    }

    /// Appends converted copies of `incoming` ahead of the trailing blank
    /// row. Returns the number of appended rows.
    pub fn append_rows(&mut self, incoming: Vec<TableRow>, coercion: TextCoercion) -> usize {
        let len = self.len();
        let count = incoming.len();
        self.insert_rows(len, incoming, coercion);
        count
    }

    /// Removes, by content, the first row matching each of `moved`.
    /// Returns the number of removed rows.
    pub fn remove_matching(&mut self, moved: &[TableRow]) -> usize {
        with_rows!(mut self, rows => reorder::remove_matching(rows, moved, |item, target| {
            item.same_content(&Row::from_table_row(target.clone(), TextCoercion::Verbatim))
        }))
    }

    /// Removes the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range.
    pub fn remove(&mut self, index: usize) -> DomainResult<TableRow> {
        let kind = self.kind();
        let len = self.len();
        if index >= len {
            return Err(DomainError::RowOutOfRange { kind, index, len });
        }
        Ok(with_rows!(mut self, rows => rows.remove(index).to_table_row()))
    }

    /// Writes `text` into a cell and returns the previous content.
    ///
    /// Body values are classified from the text. Writing a key activates the
    /// row.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range.
    pub fn set_cell(&mut self, index: usize, field: CellField, text: &str) -> DomainResult<CellValue> {
        let kind = self.kind();
        let len = self.len();
        let out_of_range = DomainError::RowOutOfRange { kind, index, len };
        match (self, field) {
            (Self::Plain { rows, .. }, CellField::Key) => {
                let row = rows.get_mut(index).ok_or(out_of_range)?;
                row.is_active = true;
                Ok(CellValue::Text(std::mem::replace(&mut row.key, text.to_string())))
            }
            (Self::Body(rows), CellField::Key) => {
                let row = rows.get_mut(index).ok_or(out_of_range)?;
                row.is_active = true;
                Ok(CellValue::Text(std::mem::replace(&mut row.key, text.to_string())))
            }
            (Self::Plain { rows, .. }, CellField::Value) => {
                let row = rows.get_mut(index).ok_or(out_of_range)?;
                Ok(CellValue::Text(std::mem::replace(&mut row.value, text.to_string())))
            }
            (Self::Body(rows), CellField::Value) => {
                let row = rows.get_mut(index).ok_or(out_of_range)?;
                Ok(CellValue::Body(std::mem::replace(
                    &mut row.value,
                    flat_to_structured(text),
                )))
            }
        }
    }

    /// Writes a recorded cell content back.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range.
    pub fn restore_cell(&mut self, index: usize, field: CellField, value: CellValue) -> DomainResult<()> {
        let kind = self.kind();
        let len = self.len();
        let out_of_range = DomainError::RowOutOfRange { kind, index, len };
        match (self, field) {
            (Self::Plain { rows, .. }, CellField::Key) => {
                rows.get_mut(index).ok_or(out_of_range)?.key = value.into_text();
            }
            (Self::Body(rows), CellField::Key) => {
                rows.get_mut(index).ok_or(out_of_range)?.key = value.into_text();
            }
            (Self::Plain { rows, .. }, CellField::Value) => {
                rows.get_mut(index).ok_or(out_of_range)?.value = value.into_text();
            }
            (Self::Body(rows), CellField::Value) => {
                rows.get_mut(index).ok_or(out_of_range)?.value = value.into_body();
            }
        }
        Ok(())
    }

    /// Sets the active flag on every row.
    pub fn set_all_active(&mut self, active: bool) {
        with_rows!(mut self, rows => rows.iter_mut().for_each(|row| row.set_active(active)));
    }

    /// Replaces every row with converted copies of `incoming`.
    pub fn replace(&mut self, incoming: Vec<TableRow>, coercion: TextCoercion) {
        with_rows!(mut self, rows => {
            *rows = incoming
                .into_iter()
                .map(|row| Row::from_table_row(row, coercion))
                .collect();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers() -> Vec<Record> {
        let mut rows = vec![
            Record::new("Accept", "*/*"),
            Record::new("Connection", "keep-alive"),
            Record::default(),
        ];
        invariant::renumber(&mut rows);
        rows
    }

    #[test]
    fn test_kind_parses_and_displays() {
        assert_eq!("Headers".parse::<TableKind>().unwrap(), TableKind::Headers);
        assert_eq!("param".parse::<TableKind>().unwrap(), TableKind::Params);
        assert!("cookies".parse::<TableKind>().is_err());
        assert_eq!(TableKind::Body.to_string(), "body");
    }

    #[test]
    fn test_snapshot_rejects_sentinel() {
        let rows = headers();
        let table = TableRef::Plain { kind: TableKind::Headers, rows: &rows };
        assert_eq!(table.snapshot(&[2]), Err(DomainError::SentinelRow(TableKind::Headers)));
        assert!(matches!(
            table.snapshot(&[5]),
            Err(DomainError::RowOutOfRange { index: 5, len: 3, .. })
        ));
        assert_eq!(table.snapshot(&[1, 0]).unwrap().len(), 2);
    }

    #[test]
    fn test_insert_rows_renumbers_tail() {
        let mut rows = headers();
        let mut table = TableMut::Plain { kind: TableKind::Headers, rows: &mut rows };
        let at = table.insert_rows(
            1,
            vec![TableRow::Body(BodyRecord::new("n", BodyValue::Bool(true)))],
            TextCoercion::Verbatim,
        );
        assert_eq!(at, 1);
        assert_eq!(rows[1], Record { key: "n".into(), value: "true".into(), is_active: true, position: 1 });
        let positions: Vec<usize> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_insert_rows_keeps_typed_blank_row_last() {
        let mut rows = headers();
        rows[2].value = "typed".into();
        let mut table = TableMut::Plain { kind: TableKind::Headers, rows: &mut rows };
        let count = table.append_rows(vec![TableRow::Plain(Record::new("Host", "x"))], TextCoercion::Verbatim);
        assert_eq!(count, 1);
        table.maintain();
        let cells: Vec<(&str, &str)> = rows.iter().map(|r| (r.key.as_str(), r.value.as_str())).collect();
        assert_eq!(
            cells,
            vec![("Accept", "*/*"), ("Connection", "keep-alive"), ("Host", "x"), ("", "typed")]
        );
        assert!(TableRef::Plain { kind: TableKind::Headers, rows: &rows }.is_settled());
    }

    #[test]
    fn test_set_cell_returns_previous_and_activates_on_key() {
        let mut rows = vec![BodyRecord::default()];
        let mut table = TableMut::Body(&mut rows);
        let old = table.set_cell(0, CellField::Value, "[1]").unwrap();
        assert_eq!(old, CellValue::Body(BodyValue::text("")));
        let old = table.set_cell(0, CellField::Key, "ids").unwrap();
        assert_eq!(old, CellValue::Text(String::new()));
        assert!(rows[0].is_active);
        assert!(matches!(rows[0].value, BodyValue::Array(_)));
    }

    #[test]
    fn test_restore_cell_writes_back() {
        let mut rows = headers();
        let mut table = TableMut::Plain { kind: TableKind::Headers, rows: &mut rows };
        let old = table.set_cell(0, CellField::Value, "text/html").unwrap();
        table.restore_cell(0, CellField::Value, old).unwrap();
        assert_eq!(rows[0].value, "*/*");
    }

    #[test]
    fn test_remove_matching_uses_content() {
        let mut rows = headers();
        let mut table = TableMut::Plain { kind: TableKind::Headers, rows: &mut rows };
        let removed = table.remove_matching(&[TableRow::Plain(Record::inactive("Accept", "*/*"))]);
        assert_eq!(removed, 1);
        assert_eq!(TableRef::Plain { kind: TableKind::Headers, rows: &rows }.keys(), vec!["Connection", ""]);
    }
}
