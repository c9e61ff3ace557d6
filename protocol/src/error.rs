//! Error types for the Thumber transaction protocol.
//!
//! Fatal failures surface as [`TransactionError`]. Problems with a single
//! field during decoding are [`FieldError`]s: they are logged and skipped,
//! never returned from a decode call.

use thiserror::Error;

/// Errors that abort a codec or checksum operation.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The input text is not a well-formed JSON object.
    #[error("malformed transaction JSON: {0}")]
    Parse(String),

    /// The stored base64 payload could not be decoded.
    #[error(transparent)]
    Decoding(#[from] PayloadError),

    /// The HMAC primitive could not be initialized or failed.
    #[error("checksum computation failed: {0}")]
    ChecksumComputation(String),

    /// The field map could not be rendered as JSON text.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TransactionError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() || err.is_data() {
            TransactionError::Parse(err.to_string())
        } else {
            TransactionError::Serialization(err.to_string())
        }
    }
}

/// Failure to apply one recognized JSON value to its field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The JSON value has the wrong type for the field.
    #[error("field `{key}` expects {expected}, got {found}")]
    TypeMismatch {
        /// Wire key of the field.
        key: &'static str,
        /// Human-readable description of the accepted JSON type.
        expected: &'static str,
        /// JSON type that was actually present.
        found: &'static str,
    },

    /// The JSON number does not fit the field's integer type.
    #[error("field `{key}` value {value} is out of range")]
    OutOfRange {
        /// Wire key of the field.
        key: &'static str,
        /// The rejected value, rendered as JSON.
        value: String,
    },
}

/// Errors from the payload dual-view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The base64 text is not valid standard, padded base64.
    #[error("payload is not valid base64: {0}")]
    Decoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_map_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(
            TransactionError::from(err),
            TransactionError::Parse(_)
        ));
    }

    #[test]
    fn payload_error_is_transparent() {
        let err = TransactionError::from(PayloadError::Decoding("bad byte".into()));
        assert_eq!(err.to_string(), "payload is not valid base64: bad byte");
    }

    #[test]
    fn field_error_names_the_key() {
        let err = FieldError::TypeMismatch {
            key: "pg",
            expected: "an integer",
            found: "string",
        };
        assert_eq!(err.to_string(), "field `pg` expects an integer, got string");
    }
}
