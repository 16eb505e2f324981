//! Reqtab Domain - Core editing types
//!
//! This crate defines the data model of the request table editor: collections
//! of requests, the three key-value tables of a request and the algorithms
//! that keep them ordered. All types here are pure Rust with no I/O
//! dependencies.

pub mod clipboard;
pub mod coercion;
pub mod collection;
pub mod error;
pub mod history;
pub mod id;
pub mod raw;
pub mod request;
pub mod settings;
pub mod table;
pub mod undo;

pub use clipboard::{
    Clipboard, ClipboardContent, ClipboardPayload, PasteTarget, TableCell, TableRowData, TableView,
};
pub use coercion::{TextCoercion, flat_to_structured, structured_to_flat};
pub use collection::Collection;
pub use error::{DomainError, DomainResult};
pub use history::{ResponseEntry, ResponseHistory, ResponseStatus};
pub use id::generate_id;
pub use request::{HttpMethod, Request};
pub use settings::EditorSettings;
pub use table::{
    BodyRecord, BodyValue, CellField, CellValue, Record, Row, TableKind, TableMut, TableRef,
    TableRow,
};
pub use undo::{UndoEntry, UndoStack};
