//! Request definitions.

mod method;
mod query;

pub use method::HttpMethod;
pub use query::{QuerySplit, split_query, with_scheme};

use serde::{Deserialize, Serialize};

use crate::coercion::TextCoercion;
use crate::history::ResponseHistory;
use crate::table::{BodyRecord, Record, TableKind, TableMut, TableRef, TableRow, invariant};

/// A request definition with its three tables and response history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Method tag.
    #[serde(rename = "typeReq", alias = "method", default)]
    pub method: HttpMethod,
    /// URL text as typed.
    #[serde(default)]
    pub url: String,
    /// Query parameter rows.
    #[serde(default)]
    pub params: Vec<Record>,
    /// Header rows.
    #[serde(default)]
    pub headers: Vec<Record>,
    /// Body rows.
    #[serde(default)]
    pub body: Vec<BodyRecord>,
    /// Recorded responses, newest first.
    #[serde(default)]
    pub responses: ResponseHistory,
}

impl Request {
    /// Creates a GET request with the default header set and blank params
    /// and body tables.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let mut request = Self::empty(title, HttpMethod::Get);
        request.headers = vec![
            Record::new("Accept", "*/*"),
            Record::inactive("Accept-Encoding", "utf-8"),
            Record::new("Content-Type", "application/json"),
            Record::new("Connection", "keep-alive"),
            Record::new("User-Agent", "PostmanRuntime/7.43.0"),
        ];
        request.normalize();
        request
    }

    /// Creates a POST request seeded with `rows` in table `kind`.
    ///
    /// Carries only the `Accept` and `Content-Type` headers besides any
    /// dropped header rows.
    #[must_use]
    pub fn from_rows(title: impl Into<String>, kind: TableKind, rows: Vec<TableRow>) -> Self {
        let mut request = Self::empty(title, HttpMethod::Post);
        request.headers = vec![
            Record::new("Accept", "*/*"),
            Record::new("Content-Type", "application/json"),
        ];
        request.table_mut(kind).append_rows(rows, TextCoercion::Verbatim);
        request.normalize();
        request
    }

    fn empty(title: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            id: crate::generate_id(),
            title: title.into(),
            method,
            url: String::new(),
            params: Vec::new(),
            headers: Vec::new(),
            body: Vec::new(),
            responses: ResponseHistory::default(),
        }
    }

    /// Mutable view of one table.
    pub fn table_mut(&mut self, kind: TableKind) -> TableMut<'_> {
        match kind {
            TableKind::Params => TableMut::Plain { kind, rows: &mut self.params },
            TableKind::Headers => TableMut::Plain { kind, rows: &mut self.headers },
            TableKind::Body => TableMut::Body(&mut self.body),
        }
    }

    /// Read-only view of one table.
    #[must_use]
    pub fn table(&self, kind: TableKind) -> TableRef<'_> {
        match kind {
            TableKind::Params => TableRef::Plain { kind, rows: &self.params },
            TableKind::Headers => TableRef::Plain { kind, rows: &self.headers },
            TableKind::Body => TableRef::Body(&self.body),
        }
    }

    /// Restores positions and the blank row in all three tables.
    pub fn normalize(&mut self) {
        invariant::maintain(&mut self.params);
        invariant::maintain(&mut self.headers);
        invariant::maintain(&mut self.body);
    }

    /// Returns true when all three tables are settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        TableKind::all().into_iter().all(|kind| self.table(kind).is_settled())
    }
}
