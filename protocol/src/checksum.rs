//! # Checksum Engine
//!
//! Turns a field map into a canonical string and signs it with HMAC-SHA256.
//!
//! ## Canonical string
//!
//! 1. Drop the `checksum` key.
//! 2. Render each value as text: strings as-is, numbers in decimal,
//!    booleans as `true`/`false`.
//! 3. Keep at most the first 1024 UTF-16 code units of each rendered value.
//! 4. Sort by key (byte-wise lexicographic).
//! 5. Emit `key=value` pairs joined with `&`.
//!
//! Sender and verifier may enumerate fields in any order; step 4 is what
//! makes them agree. The format must stay byte-identical to what other
//! Thumber implementations produce.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, trace};

use crate::codec::FieldMap;
use crate::config::{
    CANONICAL_ENTRY_SEPARATOR, CANONICAL_PAIR_SEPARATOR, KEY_CHECKSUM, MAX_CANONICAL_VALUE_UNITS,
};
use crate::crypto::mac::{checksums_match, hmac_sha256_hex};
use crate::error::TransactionError;

/// Renders a wire value the way it contributes to the canonical string.
pub fn canonical_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        // Numbers and booleans print identically in JSON and as text;
        // arrays and objects never appear in a flat envelope.
        other => other.to_string(),
    }
}

/// Truncates `text` to its longest prefix of at most `max_units` UTF-16
/// code units.
///
/// A character outside the Basic Multilingual Plane takes two units. When
/// such a surrogate pair straddles the limit, the cut lands before the
/// whole pair, so the prefix may be one unit short of `max_units`.
fn truncate_utf16(text: &str, max_units: usize) -> &str {
    let mut units = 0;
    for (byte_offset, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > max_units {
            return &text[..byte_offset];
        }
    }
    text
}

/// Builds the canonical string for a field map.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use thumber_protocol::checksum::canonicalize;
///
/// let fields = json!({ "uid": "u1", "checksum": "stale", "pg": 2 });
/// let canonical = canonicalize(fields.as_object().unwrap());
/// assert_eq!(canonical, "pg=2&uid=u1");
/// ```
pub fn canonicalize(fields: &FieldMap) -> String {
    let sorted: BTreeMap<&str, String> = fields
        .iter()
        .filter(|(key, _)| key.as_str() != KEY_CHECKSUM)
        .map(|(key, value)| {
            let rendered = canonical_value(value);
            let kept = truncate_utf16(&rendered, MAX_CANONICAL_VALUE_UNITS).to_string();
            (key.as_str(), kept)
        })
        .collect();

    let mut canonical = String::new();
    for (position, (key, value)) in sorted.iter().enumerate() {
        if position > 0 {
            canonical.push(CANONICAL_ENTRY_SEPARATOR);
        }
        canonical.push_str(key);
        canonical.push(CANONICAL_PAIR_SEPARATOR);
        canonical.push_str(value);
    }
    canonical
}

/// Computes the checksum of a field map under `secret`.
///
/// # Errors
///
/// [`TransactionError::ChecksumComputation`] if the HMAC cannot be computed.
pub fn compute_checksum(fields: &FieldMap, secret: &str) -> Result<String, TransactionError> {
    let canonical = canonicalize(fields);
    trace!(len = canonical.len(), "canonical string built");
    let checksum = hmac_sha256_hex(secret.as_bytes(), canonical.as_bytes())?;
    debug!(fields = fields.len(), "checksum computed");
    Ok(checksum)
}

/// Checks the `checksum` entry of a field map against the recomputed value.
///
/// A missing or non-string `checksum` entry is a mismatch, as is any
/// failure to compute the expected value.
pub fn verify_fields(fields: &FieldMap, secret: &str) -> bool {
    let Some(Value::String(stored)) = fields.get(KEY_CHECKSUM) else {
        return false;
    };
    match compute_checksum(fields, secret) {
        Ok(expected) => checksums_match(&expected, stored),
        Err(_) => false,
    }
}
