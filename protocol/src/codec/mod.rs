//! # Codec Core
//!
//! Converts between typed transactions and flat JSON documents.
//!
//! ```text
//! field.rs: FieldSpec / FieldTable: the static per-type field registry
//! mod.rs  : FieldMap, JSON text <-> map, and the typed value helpers
//!            that getters and setters are written with
//! ```
//!
//! Decoding is lenient about *content* (unknown keys and mistyped values
//! are skipped with a warning) but strict about *shape*: anything other
//! than a well-formed JSON object is a [`TransactionError::Parse`].

pub mod field;

pub use field::{FieldSpec, FieldTable, Getter, Setter};

use serde_json::{Map, Value};

use crate::error::{FieldError, TransactionError};

/// Flat key/value view of a transaction, as it appears on the wire.
pub type FieldMap = Map<String, Value>;

/// Parses JSON text into a field map.
///
/// # Errors
///
/// [`TransactionError::Parse`] if the text is not valid JSON or its top
/// level is not an object.
pub fn parse_object(json: &str) -> Result<FieldMap, TransactionError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        other => Err(TransactionError::Parse(format!(
            "expected a JSON object, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Renders a field map as compact JSON text.
pub fn render_object(map: &FieldMap) -> Result<String, TransactionError> {
    serde_json::to_string(map).map_err(|e| TransactionError::Serialization(e.to_string()))
}

/// Name of a JSON value's type, for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Getter helpers
// ---------------------------------------------------------------------------

/// Wire value of an optional string field.
pub fn optional_string(slot: &Option<String>) -> Option<Value> {
    slot.as_ref().map(|s| Value::String(s.clone()))
}

// ---------------------------------------------------------------------------
// Setter helpers
// ---------------------------------------------------------------------------

/// Reads a JSON string; `null` reads as `None`.
pub fn expect_optional_string(
    key: &'static str,
    value: &Value,
) -> Result<Option<String>, FieldError> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        other => Err(mismatch(key, "a string", other)),
    }
}

/// Applies a JSON string (or `null`, which clears the field) to an optional
/// string field. The field is untouched on error.
pub fn set_optional_string(
    key: &'static str,
    slot: &mut Option<String>,
    value: &Value,
) -> Result<(), FieldError> {
    *slot = expect_optional_string(key, value)?;
    Ok(())
}

/// Reads a JSON integer as `i64`.
pub fn expect_i64(key: &'static str, value: &Value) -> Result<i64, FieldError> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(v) => Ok(v),
            None if n.is_u64() => Err(FieldError::OutOfRange {
                key,
                value: n.to_string(),
            }),
            None => Err(mismatch(key, "an integer", value)),
        },
        other => Err(mismatch(key, "an integer", other)),
    }
}

/// Reads a JSON integer that must fit in an `i32`.
pub fn expect_i32(key: &'static str, value: &Value) -> Result<i32, FieldError> {
    let wide = expect_i64(key, value)?;
    i32::try_from(wide).map_err(|_| FieldError::OutOfRange {
        key,
        value: wide.to_string(),
    })
}

/// Reads a JSON boolean.
pub fn expect_bool(key: &'static str, value: &Value) -> Result<bool, FieldError> {
    value.as_bool().ok_or_else(|| mismatch(key, "a boolean", value))
}

fn mismatch(key: &'static str, expected: &'static str, found: &Value) -> FieldError {
    FieldError::TypeMismatch {
        key,
        expected,
        found: json_type_name(found),
    }
}
