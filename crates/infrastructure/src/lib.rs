//! Reqtab Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{ArboardClipboard, ConsolePrompt, StaticPrompt, SystemClock, TracingNotifier};
pub use persistence::{JsonFileCollectionStore, SettingsError, SettingsRepository, default_data_file};
pub use serialization::{
    SerializationError, from_json, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
