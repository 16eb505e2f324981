//! Row selection per table.

use std::collections::{BTreeMap, BTreeSet};

use reqtab_domain::TableKind;

/// Selected row indices of each table of the displayed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: BTreeMap<TableKind, BTreeSet<usize>>,
}

impl Selection {
    /// Flips the selection of one row. Returns whether it is now selected.
    pub fn toggle(&mut self, kind: TableKind, index: usize) -> bool {
        let set = self.rows.entry(kind).or_default();
        if set.remove(&index) {
            false
        } else {
            set.insert(index);
            true
        }
    }

    /// Selects every index in `selectable` unless all of them already are,
    /// in which case they are all deselected.
    pub fn toggle_all(&mut self, kind: TableKind, selectable: &[usize]) {
        let set = self.rows.entry(kind).or_default();
        if selectable.iter().any(|i| !set.contains(i)) {
            set.extend(selectable.iter().copied());
        } else {
            for index in selectable {
                set.remove(index);
            }
        }
    }

    /// Selected indices of a table, ascending.
    #[must_use]
    pub fn indices(&self, kind: TableKind) -> Vec<usize> {
        self.rows
            .get(&kind)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns true when the row is selected.
    #[must_use]
    pub fn contains(&self, kind: TableKind, index: usize) -> bool {
        self.rows.get(&kind).is_some_and(|set| set.contains(&index))
    }

    /// Clears one table.
    pub fn clear(&mut self, kind: TableKind) {
        self.rows.remove(&kind);
    }

    /// Clears every table.
    pub fn clear_all(&mut self) {
        self.rows.clear();
    }
}
