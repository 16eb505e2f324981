//! Editor settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux: ~/.config/reqtab/settings.json
//! - macOS: ~/Library/Application Support/reqtab/settings.json
//! - Windows: %APPDATA%/reqtab/settings.json

use std::fs;
use std::path::PathBuf;

use reqtab_domain::EditorSettings;

use super::{APP_DIR, default_data_file};
use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for editor settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository using the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::settings_path(),
        }
    }

    /// Creates a repository reading and writing an explicit file.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("settings.json"))
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist. A missing data
    /// file location is filled with the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<EditorSettings, SettingsError> {
        let mut settings = match &self.path {
            Some(path) if path.exists() => from_json_bytes(&fs::read(path)?)?,
            _ => EditorSettings::default(),
        };

        if settings.data_file.is_none() {
            settings.data_file = default_data_file();
        }
        Ok(settings)
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, settings: &EditorSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, to_json_stable_bytes(settings)?)?;
        Ok(())
    }

    /// Returns the path where settings are stored, if available.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}
