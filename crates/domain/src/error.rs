//! Domain error types

use thiserror::Error;

use crate::table::TableKind;

/// Domain-level errors that can occur during validation or table mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A row index does not address a row of the table.
    #[error("row {index} out of range for {kind} table of length {len}")]
    RowOutOfRange {
        /// Table the index was applied to.
        kind: TableKind,
        /// The offending index.
        index: usize,
        /// Length of the table at the time of the call.
        len: usize,
    },

    /// The trailing blank row cannot be selected, dragged or copied.
    #[error("the blank {0} row cannot be selected, dragged or copied")]
    SentinelRow(TableKind),

    /// The raw editor text is not a JSON object.
    #[error("invalid raw table: {0}")]
    InvalidRawTable(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
