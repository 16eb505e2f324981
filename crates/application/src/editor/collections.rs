//! Sidebar operations on collections and requests.

use reqtab_domain::table::reorder;
use reqtab_domain::{Collection, HttpMethod, Request, UndoEntry};
use tracing::{debug, info};

use super::Editor;
use crate::error::{ApplicationError, ApplicationResult};

impl Editor {
    /// Appends an empty collection titled `New collection N` and returns its
    /// id.
    pub fn create_collection(&mut self) -> String {
        let collection = Collection::new(format!("New collection {}", self.collections.len() + 1));
        let id = collection.id.clone();
        info!(collection_id = %id, title = %collection.title, "created collection");
        self.collections.push(collection);
        self.autosave();
        id
    }

    /// Renames a collection, recording the old title for undo.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown collection.
    pub fn rename_collection(&mut self, collection_id: &str, title: &str) -> ApplicationResult<()> {
        let collection = self
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?;

        let old = std::mem::replace(&mut collection.title, title.to_string());
        self.undo.push(UndoEntry::CollectionTitle {
            collection_id: collection_id.to_string(),
            old,
            new: title.to_string(),
        });
        self.autosave();
        Ok(())
    }

    /// Deletes the collection at `index` after confirmation.
    ///
    /// Returns `Ok(false)` when the user declined; nothing changes then.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] when the index is out of range.
    pub fn delete_collection(&mut self, index: usize) -> ApplicationResult<bool> {
        let title = self
            .collections
            .get(index)
            .map(|c| c.title.clone())
            .ok_or_else(|| ApplicationError::NotFound(format!("collection #{index}")))?;

        let confirmed = self.ports.prompt.confirm(
            "Delete Collection",
            &format!(
                "Are you sure you want to delete the collection \"{title}\"? This action cannot be undone."
            ),
        );
        if !confirmed {
            debug!(%title, "collection delete declined");
            return Ok(false);
        }

        self.collections.remove(index);
        self.active = None;
        self.selection.clear_all();
        info!(%title, "deleted collection");
        self.autosave();
        Ok(true)
    }

    /// Appends a GET request titled `New request N` with the default headers,
    /// displays it and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown collection.
    pub fn create_request(&mut self, collection_id: &str) -> ApplicationResult<String> {
        let capacity = self.settings.history_capacity;
        let collection = self
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?;

        let mut request = Request::new(format!("New request {}", collection.requests.len() + 1));
        request.responses.set_capacity(capacity);
        let id = request.id.clone();
        info!(request_id = %id, title = %request.title, "created request");
        collection.requests.push(request);

        self.activate(collection_id, &id)?;
        self.autosave();
        Ok(id)
    }

    /// Renames a request, recording the old title for undo.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown request.
    pub fn rename_request(&mut self, request_id: &str, title: &str) -> ApplicationResult<()> {
        let request = self.request_mut(request_id)?;
        let old = std::mem::replace(&mut request.title, title.to_string());
        self.undo.push(UndoEntry::RequestTitle {
            request_id: request_id.to_string(),
            old,
            new: title.to_string(),
        });
        self.autosave();
        Ok(())
    }

    /// Changes the method of the displayed request.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] when no request is displayed.
    pub fn set_method(&mut self, method: HttpMethod) -> ApplicationResult<()> {
        self.active_request_mut()?.method = method;
        Ok(())
    }

    /// Deletes the request at `index` of a collection after confirmation.
    ///
    /// Returns `Ok(false)` when the user declined; nothing changes then.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown collection or an
    /// out of range index.
    pub fn delete_request(&mut self, collection_id: &str, index: usize) -> ApplicationResult<bool> {
        let title = self
            .collections
            .iter()
            .find(|c| c.id == collection_id)
            .and_then(|c| c.requests.get(index))
            .map(|r| r.title.clone())
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("request #{index} in collection {collection_id}"))
            })?;

        let confirmed = self.ports.prompt.confirm(
            "Delete Request",
            &format!(
                "Are you sure you want to delete the request \"{title}\"? This action cannot be undone."
            ),
        );
        if !confirmed {
            debug!(%title, "request delete declined");
            return Ok(false);
        }

        if let Some(collection) = self.collections.iter_mut().find(|c| c.id == collection_id) {
            collection.requests.remove(index);
        }
        self.active = None;
        self.selection.clear_all();
        info!(%title, "deleted request");
        self.autosave();
        Ok(true)
    }

    /// Moves a collection in the sidebar.
    pub fn move_collection(&mut self, from: usize, to: usize) {
        reorder::move_item(&mut self.collections, from, to);
        debug!(from, to, "moved collection");
        self.autosave();
    }

    /// Moves a request inside its collection.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown collection.
    pub fn move_request(&mut self, collection_id: &str, from: usize, to: usize) -> ApplicationResult<()> {
        let collection = self
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?;
        reorder::move_item(&mut collection.requests, from, to);
        debug!(collection_id, from, to, "moved request");
        self.autosave();
        Ok(())
    }
}
