//! Field validation and coercion between wire JSON and column values.
//!
//! Every declared field is checked independently and all failures are
//! collected, so a single response names every invalid field. Keys that are
//! not declared (including `id`) are ignored.

use crate::models::schema::{FieldKind, FieldSpec};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt, sync::LazyLock};

/// Decoded JSON request body.
pub type Payload = Map<String, Value>;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const INVALID_STRING: &str = "Not a valid string.";
const INVALID_INTEGER: &str = "A valid integer is required.";
const INVALID_EMAIL: &str = "Enter a valid email address.";

/// `local@domain.tld`: no whitespace, no empty labels, at least one dot in
/// the domain.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$").expect("email pattern is valid")
});

/// A validated column value ready to be bound into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

/// Field name to error messages, serialized as `{"field": ["message"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
impl FieldErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.0.keys().map(String::as_str).collect::<Vec<_>>();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Validate `payload` against `fields`.
///
/// With `partial` set, absent fields are skipped; otherwise each one is
/// reported as required. On success the values come back in declaration
/// order.
pub fn validate(
    fields: &[FieldSpec],
    payload: &Payload,
    partial: bool,
) -> Result<Vec<(&'static str, FieldValue)>, FieldErrors> {
    let mut values = Vec::with_capacity(fields.len());
    let mut errors = FieldErrors::default();

    for field in fields {
        let Some(raw) = payload.get(field.name) else {
            if !partial {
                errors.add(field.name, REQUIRED);
            }
            continue;
        };

        match coerce(field.kind, raw) {
            Ok(value) => values.push((field.name, value)),
            Err(message) => errors.add(field.name, message),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Normalize a natural-key value from a request body the way a text field
/// is normalized on create, so any stored name can be looked up again.
pub fn natural_key(raw: &Value) -> Result<String, String> {
    if raw.is_null() {
        return Err(NOT_NULL.into());
    }
    coerce_text(raw, usize::MAX)
}

fn coerce(kind: FieldKind, raw: &Value) -> Result<FieldValue, String> {
    if raw.is_null() {
        return Err(NOT_NULL.into());
    }

    match kind {
        FieldKind::Text { max_len } => coerce_text(raw, max_len).map(FieldValue::Text),
        FieldKind::Integer => coerce_integer(raw)
            .map(FieldValue::Integer)
            .ok_or_else(|| INVALID_INTEGER.to_string()),
        FieldKind::Email { max_len } => {
            let text = coerce_text(raw, max_len)?;
            if EMAIL_SHAPE.is_match(&text) {
                Ok(FieldValue::Text(text))
            } else {
                Err(INVALID_EMAIL.into())
            }
        }
    }
}

fn coerce_text(raw: &Value, max_len: usize) -> Result<String, String> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(INVALID_STRING.into()),
    };

    if text.is_empty() {
        return Err(NOT_BLANK.into());
    }
    if text.chars().count() > max_len {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            max_len
        ));
    }
    Ok(text)
}

fn coerce_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => parse_integer_str(s.trim()),
        _ => None,
    }
}

/// Accepts `"18"` as well as `"18.0"`; rejects any non-zero fraction.
fn parse_integer_str(s: &str) -> Option<i64> {
    let whole = match s.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole,
        Some(_) => return None,
        None => s,
    };
    whole.parse().ok()
}
