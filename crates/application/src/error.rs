//! Application error types

use reqtab_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A domain rule was violated.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The operation was rejected and nothing changed. Already reported
    /// through the notifier.
    #[error("{0}")]
    Validation(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Saving or loading the collections failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The operation was cancelled.
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
