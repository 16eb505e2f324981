//! Drag gesture state.

use reqtab_domain::{TableKind, TableRow};

/// Where the dragged rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSource {
    /// Request owning the source table.
    pub request_id: String,
    /// Source table.
    pub kind: TableKind,
    /// Index of the row under the pointer.
    pub index: usize,
    /// Indices of every dragged row, ascending.
    pub indices: Vec<usize>,
}

/// One gesture from drag start to drop or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Gesture number, unique within the session.
    pub id: u64,
    /// Deep copies of the dragged rows taken at drag start.
    pub rows: Vec<TableRow>,
    /// Origin of the rows.
    pub source: DragSource,
}

impl DragGesture {
    /// Returns true when several rows are carried.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.rows.len() > 1
    }
}

/// A drop on a table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Table receiving the drop.
    pub kind: TableKind,
    /// Index the rows are dropped at.
    pub index: usize,
    /// Whether the drop lands in the list the drag started from.
    pub same_container: bool,
}

/// A drop outside the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropContext {
    /// A request entry in the sidebar.
    Request {
        /// Target request.
        request_id: String,
    },
    /// A table tab of the displayed request.
    Tab {
        /// Target table.
        kind: TableKind,
    },
    /// A collection entry in the sidebar.
    Collection {
        /// Target collection.
        collection_id: String,
    },
}

/// What a successful drop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Rows were reordered inside their table.
    Reordered {
        /// The reordered table.
        kind: TableKind,
        /// Index the rows now start at.
        at: usize,
    },
    /// Rows were moved into another table.
    Moved {
        /// Destination request.
        request_id: String,
        /// Destination table.
        kind: TableKind,
        /// Number of moved rows.
        count: usize,
    },
    /// Rows were copied into another table.
    Copied {
        /// Destination request.
        request_id: String,
        /// Destination table.
        kind: TableKind,
        /// Number of copied rows.
        count: usize,
    },
    /// A new request was created from the rows.
    CreatedRequest {
        /// Collection receiving the request.
        collection_id: String,
        /// The new request.
        request_id: String,
    },
}

/// Drag state shared by the drop and hover handlers.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Snapshot of the current or just finished gesture.
    pub gesture: Option<DragGesture>,
    /// Whether the pointer is still down.
    pub dragging: bool,
    /// Request under the pointer in the sidebar.
    pub hovered_request: Option<String>,
    /// Collection under the pointer in the sidebar.
    pub hovered_collection: Option<String>,
    /// Request the drop should land in.
    pub target_request: Option<String>,
    /// Table the drop should land in.
    pub target_tab: Option<TableKind>,
}

impl DragState {
    /// Forgets the gesture and every hover target.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
