//! Stable JSON encoding for the data files.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Failure to encode or decode a data file.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The value could not be written as JSON.
    #[error("cannot encode document: {0}")]
    Encode(#[source] serde_json::Error),

    /// The text is not a valid document of the expected shape.
    #[error("cannot decode document at line {line}, column {column}: {source}")]
    Decode {
        /// Line of the offending token, 1-based.
        line: usize,
        /// Column of the offending token, 1-based.
        column: usize,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
}

impl SerializationError {
    fn decode(source: serde_json::Error) -> Self {
        Self::Decode {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

/// Encodes a value with two-space indentation, fields in declaration order
/// and a trailing newline.
///
/// # Errors
///
/// Returns [`SerializationError::Encode`] when the value cannot be encoded.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::with_capacity(256);
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    value
        .serialize(&mut serializer)
        .map_err(SerializationError::Encode)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Same as [`to_json_stable_bytes`], as text.
///
/// # Errors
///
/// Returns [`SerializationError::Encode`] when the value cannot be encoded.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let bytes = to_json_stable_bytes(value)?;
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decodes a document from text.
///
/// # Errors
///
/// Returns [`SerializationError::Decode`] with the error position.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    from_json_bytes(json.as_bytes())
}

/// Decodes a document from file content. A leading UTF-8 byte order mark is
/// skipped.
///
/// # Errors
///
/// Returns [`SerializationError::Decode`] with the error position.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    serde_json::from_slice(bytes).map_err(SerializationError::decode)
}
