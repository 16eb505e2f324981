//! Reqtab Application - Editing session and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The `Editor` session driving every table operation
//! - Drag gesture, selection and deferred task state
//! - Application-level error handling

pub mod deferred;
pub mod drag;
pub mod editor;
pub mod error;
pub mod ports;
pub mod selection;

#[cfg(test)]
mod testing;

pub use deferred::{DeferredQueue, DeferredTask};
pub use drag::{DragGesture, DragSource, DragState, DropContext, DropOutcome, DropTarget};
pub use editor::{ActiveRequest, Editor, EditorPorts};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    ClipboardBridgeError, Clock, CollectionStore, ConfirmPrompt, Notifier, Severity, StoreError,
    SystemClipboard,
};
pub use selection::Selection;
