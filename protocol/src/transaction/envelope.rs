//! Fields common to every Thumber transaction.

use chrono::Utc;
use serde_json::Value;

use super::verification::ValidationError;
use super::Transaction;
use crate::codec::{
    expect_i64, expect_optional_string, optional_string, set_optional_string, FieldSpec,
};
use crate::config::{KEY_CHECKSUM, KEY_DATA, KEY_NONCE, KEY_TIMESTAMP};
use crate::crypto::hash::nonce_from_millis;
use crate::payload::Payload;

/// The envelope: correlation, freshness, integrity, and the optional
/// binary payload.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Identifies one logical exchange. A response carries the nonce of the
    /// request it answers.
    pub nonce: Option<String>,

    /// Unix timestamp in seconds when the transaction was produced.
    /// Zero means unset.
    pub timestamp: i64,

    /// Lowercase hex HMAC-SHA256 over every other field.
    pub checksum: Option<String>,

    /// File contents (requests) or the generated thumbnail (responses).
    /// Travels as the base64 `data` key.
    pub payload: Payload,
}

impl Envelope {
    /// Sets the nonce to a value derived from the current wall-clock time.
    pub fn set_default_nonce(&mut self) {
        self.nonce = Some(nonce_from_millis(Utc::now().timestamp_millis()));
    }

    /// Sets the timestamp to the current time.
    pub fn stamp_now(&mut self) {
        self.timestamp = Utc::now().timestamp();
    }

    /// Checks that nonce, timestamp and checksum are all present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.nonce) {
            return Err(ValidationError::MissingNonce);
        }
        if self.timestamp == 0 {
            return Err(ValidationError::MissingTimestamp);
        }
        if is_blank(&self.checksum) {
            return Err(ValidationError::MissingChecksum);
        }
        Ok(())
    }

    /// Structural completeness as a boolean.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

/// `None` and `Some("")` both count as absent for completeness checks.
pub(crate) fn is_blank(slot: &Option<String>) -> bool {
    slot.as_deref().map_or(true, str::is_empty)
}

/// The envelope's wire fields, generic over the transaction that embeds it.
pub(crate) fn envelope_fields<T: Transaction>() -> Vec<FieldSpec<T>> {
    vec![
        FieldSpec::new(
            KEY_NONCE,
            |tx: &T| optional_string(&tx.envelope().nonce),
            |tx: &mut T, value| set_optional_string(KEY_NONCE, &mut tx.envelope_mut().nonce, value),
        ),
        FieldSpec::new(
            KEY_TIMESTAMP,
            |tx: &T| Some(Value::from(tx.envelope().timestamp)),
            |tx: &mut T, value| {
                tx.envelope_mut().timestamp = expect_i64(KEY_TIMESTAMP, value)?;
                Ok(())
            },
        ),
        FieldSpec::new(
            KEY_CHECKSUM,
            |tx: &T| optional_string(&tx.envelope().checksum),
            |tx: &mut T, value| {
                set_optional_string(KEY_CHECKSUM, &mut tx.envelope_mut().checksum, value)
            },
        ),
        FieldSpec::new(
            KEY_DATA,
            |tx: &T| {
                tx.envelope()
                    .payload
                    .encoded()
                    .map(|text| Value::String(text.to_string()))
            },
            |tx: &mut T, value| {
                let payload = &mut tx.envelope_mut().payload;
                match expect_optional_string(KEY_DATA, value)? {
                    Some(text) => payload.set_encoded(text),
                    None => payload.clear(),
                }
                Ok(())
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Envelope {
        Envelope {
            nonce: Some("abc".into()),
            timestamp: 1000,
            checksum: Some("00ff".into()),
            payload: Payload::Empty,
        }
    }

    #[test]
    fn default_envelope_is_incomplete() {
        assert!(matches!(
            Envelope::default().validate(),
            Err(ValidationError::MissingNonce)
        ));
    }

    #[test]
    fn complete_envelope_validates() {
        assert!(complete().is_complete());
    }

    #[test]
    fn zero_timestamp_is_unset() {
        let mut env = complete();
        env.timestamp = 0;
        assert!(matches!(
            env.validate(),
            Err(ValidationError::MissingTimestamp)
        ));
    }

    #[test]
    fn negative_timestamp_is_set() {
        let mut env = complete();
        env.timestamp = -1;
        assert!(env.is_complete());
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let mut env = complete();
        env.checksum = Some(String::new());
        assert!(matches!(
            env.validate(),
            Err(ValidationError::MissingChecksum)
        ));

        let mut env = complete();
        env.nonce = Some(String::new());
        assert!(matches!(env.validate(), Err(ValidationError::MissingNonce)));
    }

    #[test]
    fn payload_is_not_required_by_the_envelope() {
        let env = complete();
        assert!(!env.payload.is_present());
        assert!(env.is_complete());
    }

    #[test]
    fn default_nonce_is_populated() {
        let mut env = Envelope::default();
        env.set_default_nonce();
        assert_eq!(env.nonce.as_deref().map(str::len), Some(32));
    }

    #[test]
    fn stamp_now_sets_recent_time() {
        let mut env = Envelope::default();
        env.stamp_now();
        // 2020-01-01T00:00:00Z
        assert!(env.timestamp > 1_577_836_800);
    }
}
