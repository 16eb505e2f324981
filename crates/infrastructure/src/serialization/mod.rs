//! JSON encoding of the collections and settings files.
//!
//! Files are written with fields in declaration order, two-space indentation
//! and a trailing newline, so hand edits and diffs stay readable. A byte
//! order mark left by an external editor is tolerated on read.

mod json;

pub use json::*;
