//! Collections of request definitions.

use serde::{Deserialize, Serialize};

use crate::request::Request;

/// An ordered group of requests. Vector order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Requests in display order.
    #[serde(default)]
    pub requests: Vec<Request>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: crate::generate_id(),
            title: title.into(),
            requests: Vec::new(),
        }
    }

    /// Returns a request by id.
    #[must_use]
    pub fn request(&self, id: &str) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Returns a mutable request by id.
    pub fn request_mut(&mut self, id: &str) -> Option<&mut Request> {
        self.requests.iter_mut().find(|r| r.id == id)
    }

    /// Returns true when the collection holds the request.
    #[must_use]
    pub fn contains(&self, request_id: &str) -> bool {
        self.request(request_id).is_some()
    }
}

/// Finds a request anywhere in `collections`.
#[must_use]
pub fn find_request<'a>(collections: &'a [Collection], id: &str) -> Option<&'a Request> {
    collections.iter().find_map(|c| c.request(id))
}

/// Finds a mutable request anywhere in `collections`.
pub fn find_request_mut<'a>(collections: &'a mut [Collection], id: &str) -> Option<&'a mut Request> {
    collections.iter_mut().find_map(|c| c.request_mut(id))
}

/// Id of the collection owning the request.
#[must_use]
pub fn owner_of(collections: &[Collection], request_id: &str) -> Option<String> {
    collections
        .iter()
        .find(|c| c.contains(request_id))
        .map(|c| c.id.clone())
}
