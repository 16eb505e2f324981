//! Conversion between flat text values and typed body values.
//!
//! Rows crossing between the body table and the params/headers tables, text
//! typed into a body cell, and raw JSON parsed back into body rows all go
//! through this module.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::table::BodyValue;

#[allow(clippy::expect_used)]
static TRUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)true").expect("valid regex"));

#[allow(clippy::expect_used)]
static FALSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)false").expect("valid regex"));

#[allow(clippy::expect_used)]
static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("valid regex")
});

/// How plain text becomes a body value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCoercion {
    /// Keep the text as a `String` value.
    Verbatim,
    /// Classify the text with [`flat_to_structured`].
    Classify,
}

/// Flattens a typed body value into the text used by params/headers rows.
///
/// Numbers and booleans use their canonical text; arrays and objects their
/// compact JSON serialization.
#[must_use]
pub fn structured_to_flat(value: &BodyValue) -> String {
    match value {
        BodyValue::String(text) => text.clone(),
        BodyValue::Number(number) => number.to_string(),
        BodyValue::Bool(flag) => flag.to_string(),
        BodyValue::Array(items) => JsonValue::Array(items.clone()).to_string(),
        BodyValue::Object(map) => JsonValue::Object(map.clone()).to_string(),
    }
}

/// Classifies flat text into a typed body value.
///
/// Priority order:
/// 1. JSON text whose top level is an array or object;
/// 2. text containing `true` or `false` anywhere, case-insensitively
///    (`"not true"` is `Bool(true)`);
/// 3. text that reads as a non-zero number (`""` and `"0"` do not);
/// 4. anything else stays a `String`.
///
/// Never fails: malformed JSON simply falls through to the later rules.
#[must_use]
pub fn flat_to_structured(text: &str) -> BodyValue {
    match serde_json::from_str::<JsonValue>(text) {
        Ok(JsonValue::Array(items)) => return BodyValue::Array(items),
        Ok(JsonValue::Object(map)) => return BodyValue::Object(map),
        _ => {}
    }

    if TRUE_PATTERN.is_match(text) {
        return BodyValue::Bool(true);
    }
    if FALSE_PATTERN.is_match(text) {
        return BodyValue::Bool(false);
    }

    if let Some(number) = parse_number(text).filter(|n| *n != 0.0) {
        if let Some(value) = BodyValue::number(number) {
            return value;
        }
    }

    BodyValue::String(text.to_string())
}

/// Converts text into a body value according to `coercion`.
#[must_use]
pub fn text_to_body(text: &str, coercion: TextCoercion) -> BodyValue {
    match coercion {
        TextCoercion::Verbatim => BodyValue::String(text.to_string()),
        TextCoercion::Classify => flat_to_structured(text),
    }
}

/// Converts a raw JSON member (from the raw body editor) into a body value.
///
/// Strings are classified like typed text, zero stays the text `"0"`, and
/// `null` becomes an empty string.
#[must_use]
pub fn body_value_from_json(value: &JsonValue) -> BodyValue {
    match value {
        JsonValue::Array(items) => BodyValue::Array(items.clone()),
        JsonValue::Object(map) => BodyValue::Object(map.clone()),
        JsonValue::String(text) => flat_to_structured(text),
        JsonValue::Bool(flag) => BodyValue::Bool(*flag),
        JsonValue::Number(number) => {
            if number.as_f64().is_some_and(|n| n != 0.0) {
                BodyValue::Number(number.clone())
            } else {
                BodyValue::String(number.to_string())
            }
        }
        JsonValue::Null => BodyValue::String(String::new()),
    }
}

/// Parses text the way a loose numeric conversion does: surrounding
/// whitespace is ignored, the empty string is zero, and hexadecimal, octal,
/// binary and `Infinity` literals are accepted.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix);
    }

    if DECIMAL_PATTERN.is_match(trimmed) {
        trimmed.parse::<f64>().ok()
    } else {
        None
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    })
}
