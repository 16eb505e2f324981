//! Collections document stored as one JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use reqtab_application::ports::{CollectionStore, StoreError};
use reqtab_domain::Collection;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Stores every collection in a single JSON array file.
///
/// A missing file reads as an empty document. Saves rewrite the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileCollectionStore {
    path: PathBuf,
}

impl JsonFileCollectionStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionStore for JsonFileCollectionStore {
    fn load(&self) -> Result<Vec<Collection>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no collections file yet");
            return Ok(Vec::new());
        }

        let content = fs::read(&self.path)?;
        from_json_bytes(&content).map_err(|e| StoreError::InvalidDocument(e.to_string()))
    }

    fn save(&self, collections: &[Collection]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content =
            to_json_stable_bytes(&collections).map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), collections = collections.len(), "wrote collections");
        Ok(())
    }
}
