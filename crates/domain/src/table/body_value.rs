//! Typed values held by body rows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

/// The value of a body row.
///
/// Serialized as `{"type": "<Variant>", "value": ...}` which is the layout
/// stored in collection documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BodyValue {
    /// Plain text.
    String(String),
    /// A finite JSON number.
    Number(Number),
    /// A boolean flag.
    Bool(bool),
    /// A JSON array, kept raw.
    Array(Vec<JsonValue>),
    /// A JSON object, kept raw.
    Object(Map<String, JsonValue>),
}

impl Default for BodyValue {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl BodyValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a number value. Returns `None` for NaN and infinities.
    #[must_use]
    pub fn number(value: f64) -> Option<Self> {
        number_from_f64(value).map(Self::Number)
    }

    /// Name of the active variant, as written in the `type` tag.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::Bool(_) => "Bool",
            Self::Array(_) => "Array",
            Self::Object(_) => "Object",
        }
    }

    /// Returns true for the empty text value carried by blank rows.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }
}

/// Converts a float into a JSON number, preferring the integer form when the
/// value has no fractional part so that `42` stays `42` rather than `42.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn number_from_f64(value: f64) -> Option<Number> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        let int = value as i64;
        if int == 0 && value.is_sign_negative() {
            return Number::from_f64(value);
        }
        return Some(Number::from(int));
    }
    Number::from_f64(value)
}
