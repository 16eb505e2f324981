//! Collection persistence port.

use reqtab_domain::Collection;

/// Error type for collection persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The store refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading and saving the whole collections document.
///
/// Saves are full-document writes, never incremental.
pub trait CollectionStore: Send + Sync {
    /// Loads every collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    fn load(&self) -> Result<Vec<Collection>, StoreError>;

    /// Replaces the stored document with `collections`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written.
    fn save(&self, collections: &[Collection]) -> Result<(), StoreError>;
}
