//! ID generation utilities.

use uuid::Uuid;

/// Generates a new UUID v4 as a string.
///
/// This is the id format for collections, requests and response entries.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
