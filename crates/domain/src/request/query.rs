//! Splitting a URL's query string into params rows.

use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::table::Record;

/// Result of pulling the query string out of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySplit {
    /// The URL without its query: origin, path and fragment.
    pub url: String,
    /// One active row per query pair, in query order, without blank row.
    pub params: Vec<Record>,
}

/// Prefixes `http://` unless the text already mentions a scheme.
#[must_use]
pub fn with_scheme(text: &str) -> String {
    if text.contains("http") {
        text.to_string()
    } else {
        format!("http://{text}")
    }
}

/// Splits the query string off `text`.
///
/// Returns `Ok(None)` when the URL is empty or carries no query pairs.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] when the text does not parse as a URL.
pub fn split_query(text: &str) -> DomainResult<Option<QuerySplit>> {
    if text.is_empty() {
        return Ok(None);
    }

    let full = with_scheme(text);
    let url = Url::parse(&full).map_err(|e| DomainError::InvalidUrl(format!("{full}: {e}")))?;

    if url.query().is_none_or(str::is_empty) {
        return Ok(None);
    }

    let params = url
        .query_pairs()
        .enumerate()
        .map(|(position, (key, value))| Record {
            key: key.into_owned(),
            value: value.into_owned(),
            is_active: true,
            position,
        })
        .collect();

    let fragment = url
        .fragment()
        .filter(|f| !f.is_empty())
        .map(|f| format!("#{f}"))
        .unwrap_or_default();

    Ok(Some(QuerySplit {
        url: format!("{}{}{fragment}", url.origin().ascii_serialization(), url.path()),
        params,
    }))
}
