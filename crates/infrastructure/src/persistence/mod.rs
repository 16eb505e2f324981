//! File-backed persistence of the collections document and the settings.

mod collection_store;
mod settings_repository;

pub use collection_store::JsonFileCollectionStore;
pub use settings_repository::{SettingsError, SettingsRepository};

use std::path::PathBuf;

/// Directory name used under the platform data and config directories.
pub const APP_DIR: &str = "reqtab";

/// Returns `<data_dir>/reqtab/collections.json`, if the platform has a data
/// directory.
#[must_use]
pub fn default_data_file() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_DIR).join("collections.json"))
}
