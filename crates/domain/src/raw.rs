//! The raw JSON view of a table.
//!
//! A table is shown as one JSON object mapping keys to values. Body values
//! are written as their flat text. Editing the object and parsing it back
//! replaces the table.

use serde_json::{Map, Value as JsonValue};

use crate::coercion::{body_value_from_json, structured_to_flat};
use crate::error::{DomainError, DomainResult};
use crate::table::{BodyRecord, Record, TableKind, TableRef, TableRow};

/// Renders the non-blank rows of `table` as a JSON object.
///
/// Params are pretty-printed with two-space indentation, headers and body
/// are compact. A repeated key keeps its first position and its last value.
#[must_use]
pub fn render(table: TableRef<'_>) -> String {
    let mut object = Map::new();
    for row in table.rows() {
        if row.is_sentinel() {
            continue;
        }
        let value = match &row {
            TableRow::Plain(record) => record.value.clone(),
            TableRow::Body(record) => structured_to_flat(&record.value),
        };
        object.insert(row.key().to_string(), JsonValue::String(value));
    }

    let object = JsonValue::Object(object);
    let rendered = if table.kind() == TableKind::Params {
        serde_json::to_string_pretty(&object)
    } else {
        serde_json::to_string(&object)
    };
    rendered.unwrap_or_else(|_| "{}".to_string())
}

/// Parses raw editor text into active rows for a table of `kind`, without
/// the blank row.
///
/// # Errors
///
/// Returns [`DomainError::InvalidRawTable`] when the text is not valid JSON
/// or its top level is not an object.
pub fn parse(kind: TableKind, text: &str) -> DomainResult<Vec<TableRow>> {
    let document: JsonValue =
        serde_json::from_str(text).map_err(|e| DomainError::InvalidRawTable(e.to_string()))?;
    let JsonValue::Object(object) = document else {
        return Err(DomainError::InvalidRawTable(
            "top level must be a JSON object".to_string(),
        ));
    };

    Ok(object
        .iter()
        .enumerate()
        .map(|(position, (key, value))| {
            if kind.is_body() {
                TableRow::Body(BodyRecord {
                    key: key.clone(),
                    value: body_value_from_json(value),
                    is_active: true,
                    position,
                })
            } else {
                TableRow::Plain(Record {
                    key: key.clone(),
                    value: plain_text(value),
                    is_active: true,
                    position,
                })
            }
        })
        .collect())
}

fn plain_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
