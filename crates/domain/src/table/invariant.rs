//! Table invariant maintenance.
//!
//! After every structural mutation a table must satisfy two rules:
//! - `position` equals the array index of every row;
//! - exactly one row has an empty key, and it is the last row.

use super::Row;

/// Writes `position = index` for every row.
pub fn renumber<R: Row>(table: &mut [R]) {
    for (index, row) in table.iter_mut().enumerate() {
        row.set_position(index);
    }
}

/// Guarantees exactly one trailing blank row.
///
/// A trailing blank row is kept as is (it may already hold a value typed into
/// it); every other blank row is dropped. When the last row is not blank a
/// fresh one is appended.
pub fn ensure_sentinel<R: Row>(table: &mut Vec<R>) {
    let keep_last = table.last().is_some_and(Row::is_sentinel);
    let last = table.len().saturating_sub(1);
    let mut index = 0;
    table.retain(|row| {
        let keep = !row.is_sentinel() || (keep_last && index == last);
        index += 1;
        keep
    });
    if !keep_last {
        let mut blank = R::blank();
        blank.set_position(table.len());
        table.push(blank);
    }
}

/// Restores both invariants.
pub fn maintain<R: Row>(table: &mut Vec<R>) {
    ensure_sentinel(table);
    renumber(table);
}

/// Returns true when both invariants hold.
#[must_use]
pub fn is_settled<R: Row>(table: &[R]) -> bool {
    let positions_match = table.iter().enumerate().all(|(i, row)| row.position() == i);
    let blanks = table.iter().filter(|row| row.is_sentinel()).count();
    positions_match && blanks == 1 && table.last().is_some_and(Row::is_sentinel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{BodyRecord, BodyValue, Record};
    use pretty_assertions::assert_eq;

    fn keys(table: &[Record]) -> Vec<&str> {
        table.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_renumber_matches_indices() {
        let mut table = vec![Record::new("a", "1"), Record::new("b", "2")];
        table[0].position = 9;
        table[1].position = 4;
        renumber(&mut table);
        assert_eq!(table[0].position, 0);
        assert_eq!(table[1].position, 1);
    }

    #[test]
    fn test_empty_table_gets_sentinel() {
        let mut table: Vec<Record> = Vec::new();
        maintain(&mut table);
        assert_eq!(table, vec![Record::default()]);
        assert!(is_settled(&table));
    }

    #[test]
    fn test_missing_sentinel_is_appended() {
        let mut table = vec![Record::new("a", "1")];
        maintain(&mut table);
        assert_eq!(keys(&table), vec!["a", ""]);
        assert_eq!(table[1].position, 1);
    }

    #[test]
    fn test_interior_blank_rows_are_dropped() {
        let mut table = vec![
            Record::default(),
            Record::new("a", "1"),
            Record::default(),
            Record::new("b", "2"),
        ];
        maintain(&mut table);
        assert_eq!(keys(&table), vec!["a", "b", ""]);
        assert!(is_settled(&table));
    }

    #[test]
    fn test_trailing_blank_row_keeps_its_value() {
        let mut table = vec![Record::new("a", "1"), Record::inactive("", "typed")];
        maintain(&mut table);
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].value, "typed");
    }

    #[test]
    fn test_body_sentinel_has_typed_empty_value() {
        let mut table = vec![BodyRecord::new("a", BodyValue::Bool(true))];
        maintain(&mut table);
        assert_eq!(table[1].value, BodyValue::text(""));
        assert!(!table[1].is_active);
    }

    #[test]
    fn test_maintain_is_idempotent() {
        let mut table = vec![Record::new("a", "1"), Record::default()];
        maintain(&mut table);
        let once = table.clone();
        maintain(&mut table);
        assert_eq!(table, once);
    }
}
