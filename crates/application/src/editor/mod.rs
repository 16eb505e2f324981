//! The editing session.
//!
//! [`Editor`] owns the collections and every piece of session state that the
//! table operations share: the displayed request, row selections, the drag
//! gesture, the clipboard, the undo stack and the deferred queue. Each
//! operation runs to completion synchronously and leaves every table it
//! touched with contiguous positions and one trailing blank row.

mod clipboard;
mod collections;
mod drag;
mod history;
mod rows;

use std::sync::Arc;

use reqtab_domain::collection::{find_request, find_request_mut, owner_of};
use reqtab_domain::{
    Clipboard, Collection, EditorSettings, Request, TableKind, TableMut, TableRef, UndoStack,
};
use tracing::{debug, info, warn};

use crate::deferred::DeferredQueue;
use crate::drag::DragState;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, CollectionStore, ConfirmPrompt, Notifier, Severity, SystemClipboard};
use crate::selection::Selection;

/// External collaborators of the editor.
#[derive(Clone)]
pub struct EditorPorts {
    /// Collections document storage.
    pub store: Arc<dyn CollectionStore>,
    /// User notifications.
    pub notifier: Arc<dyn Notifier>,
    /// System clipboard side channel.
    pub clipboard: Arc<dyn SystemClipboard>,
    /// Confirmation before destructive deletes.
    pub prompt: Arc<dyn ConfirmPrompt>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for EditorPorts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorPorts").finish_non_exhaustive()
    }
}

/// The request that is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRequest {
    /// Owning collection.
    pub collection_id: String,
    /// Displayed request.
    pub request_id: String,
}

/// An editing session over a set of collections.
#[derive(Debug)]
pub struct Editor {
    settings: EditorSettings,
    ports: EditorPorts,
    collections: Vec<Collection>,
    saved: Vec<Collection>,
    active: Option<ActiveRequest>,
    active_tab: TableKind,
    selection: Selection,
    drag: DragState,
    clipboard: Clipboard,
    undo: UndoStack,
    deferred: DeferredQueue,
    next_gesture: u64,
}

impl Editor {
    /// Creates an editor with no collections.
    #[must_use]
    pub fn new(settings: EditorSettings, ports: EditorPorts) -> Self {
        Self {
            settings,
            ports,
            collections: Vec::new(),
            saved: Vec::new(),
            active: None,
            active_tab: TableKind::Params,
            selection: Selection::default(),
            drag: DragState::default(),
            clipboard: Clipboard::new(),
            undo: UndoStack::new(),
            deferred: DeferredQueue::new(),
            next_gesture: 1,
        }
    }

    /// Session settings.
    #[must_use]
    pub const fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Every collection, in display order.
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Loads the collections from the store, replacing the session content.
    ///
    /// Every table is normalised on the way in.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Persistence`] when the store fails; the
    /// failure is also notified.
    pub fn load(&mut self) -> ApplicationResult<usize> {
        let mut collections = match self.ports.store.load() {
            Ok(collections) => collections,
            Err(e) => {
                warn!(error = %e, "failed to load collections");
                self.notify(Severity::Error, &format!("Failed to load collections: {e}"));
                return Err(ApplicationError::Persistence(e.to_string()));
            }
        };

        let capacity = self.settings.history_capacity;
        for request in collections.iter_mut().flat_map(|c| c.requests.iter_mut()) {
            request.normalize();
            request.responses.set_capacity(capacity);
        }

        info!(collections = collections.len(), "loaded collections");
        self.saved.clone_from(&collections);
        self.collections = collections;
        self.active = None;
        self.selection.clear_all();
        self.drag.reset();
        Ok(self.collections.len())
    }

    /// Writes the whole document to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Persistence`] when the store fails. The
    /// in-memory state is kept so the save can be retried.
    pub fn save(&mut self) -> ApplicationResult<()> {
        match self.ports.store.save(&self.collections) {
            Ok(()) => {
                self.saved.clone_from(&self.collections);
                debug!(collections = self.collections.len(), "saved collections");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save collections");
                self.notify(Severity::Error, &format!("Failed to save collections: {e}"));
                Err(ApplicationError::Persistence(e.to_string()))
            }
        }
    }

    /// Returns true when the request equals its last saved or loaded state.
    #[must_use]
    pub fn is_saved(&self, request_id: &str) -> bool {
        match (
            find_request(&self.saved, request_id),
            find_request(&self.collections, request_id),
        ) {
            (Some(saved), Some(current)) => saved == current,
            _ => false,
        }
    }

    /// The displayed request.
    #[must_use]
    pub fn active_request(&self) -> Option<&Request> {
        let active = self.active.as_ref()?;
        find_request(&self.collections, &active.request_id)
    }

    /// Address of the displayed request.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveRequest> {
        self.active.as_ref()
    }

    /// The displayed table tab.
    #[must_use]
    pub const fn active_tab(&self) -> TableKind {
        self.active_tab
    }

    /// Switches the displayed table tab.
    pub fn select_tab(&mut self, tab: TableKind) {
        self.active_tab = tab;
    }

    /// Displays a request. Row selections are cleared when the displayed
    /// request changes.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] when the collection does not
    /// hold the request.
    pub fn activate(&mut self, collection_id: &str, request_id: &str) -> ApplicationResult<()> {
        let found = self
            .collections
            .iter()
            .find(|c| c.id == collection_id)
            .is_some_and(|c| c.contains(request_id));
        if !found {
            return Err(ApplicationError::NotFound(format!(
                "request {request_id} in collection {collection_id}"
            )));
        }

        let changed = self
            .active
            .as_ref()
            .is_none_or(|a| a.request_id != request_id);
        if changed {
            self.selection.clear_all();
        }
        self.active = Some(ActiveRequest {
            collection_id: collection_id.to_string(),
            request_id: request_id.to_string(),
        });
        debug!(request_id, "activated request");
        Ok(())
    }

    /// Displays a request wherever it lives. Returns false when it no longer
    /// exists.
    fn activate_by_id(&mut self, request_id: &str) -> bool {
        match owner_of(&self.collections, request_id) {
            Some(collection_id) => self.activate(&collection_id, request_id).is_ok(),
            None => false,
        }
    }

    fn active_id(&self) -> ApplicationResult<String> {
        self.active
            .as_ref()
            .map(|a| a.request_id.clone())
            .ok_or_else(|| ApplicationError::NotFound("no request is displayed".to_string()))
    }

    fn request_mut(&mut self, request_id: &str) -> ApplicationResult<&mut Request> {
        find_request_mut(&mut self.collections, request_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("request {request_id}")))
    }

    fn active_request_mut(&mut self) -> ApplicationResult<&mut Request> {
        let id = self.active_id()?;
        self.request_mut(&id)
    }

    fn active_table(&self, kind: TableKind) -> ApplicationResult<TableRef<'_>> {
        self.active_request()
            .map(|request| request.table(kind))
            .ok_or_else(|| ApplicationError::NotFound("no request is displayed".to_string()))
    }

    fn active_table_mut(&mut self, kind: TableKind) -> ApplicationResult<TableMut<'_>> {
        Ok(self.active_request_mut()?.table_mut(kind))
    }

    fn notify(&self, severity: Severity, message: &str) {
        self.ports.notifier.notify(severity, message);
    }

    /// Notifies a rejected operation and returns the matching error.
    fn reject<T>(&self, severity: Severity, message: impl Into<String>) -> ApplicationResult<T> {
        let message = message.into();
        warn!(%message, "operation rejected");
        self.notify(severity, &message);
        Err(ApplicationError::Validation(message))
    }

    /// Saves after a mutation. A failure is notified and otherwise ignored.
    fn autosave(&mut self) {
        if let Err(error) = self.save() {
            debug!(%error, "keeping unsaved in-memory state");
        }
    }
}
