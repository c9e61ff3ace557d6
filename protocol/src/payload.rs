//! Binary payload with two interchangeable views.
//!
//! A payload arrives either as raw bytes (a file read by the sender) or as
//! base64 text (the `data` key of a decoded document). Whichever view was
//! set last is authoritative; the other one is derived on first access and
//! cached alongside it. Setting either view replaces the whole value, so a
//! cached opposite view can never outlive the value it was derived from.

use std::cell::OnceCell;
use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::PayloadError;

/// The thumbnail payload carried in a transaction envelope.
#[derive(Clone, Default)]
pub enum Payload {
    /// No payload in either view.
    #[default]
    Empty,
    /// Raw bytes are authoritative; base64 text is derived on demand.
    Raw {
        bytes: Vec<u8>,
        encoded: OnceCell<String>,
    },
    /// Base64 text is authoritative; raw bytes are decoded on demand.
    Encoded {
        text: String,
        raw: OnceCell<Vec<u8>>,
    },
}

impl Payload {
    /// Builds a payload whose source of truth is `bytes`.
    pub fn from_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Payload::Raw {
            bytes: bytes.into(),
            encoded: OnceCell::new(),
        }
    }

    /// Builds a payload whose source of truth is the base64 `text`.
    pub fn from_encoded(text: impl Into<String>) -> Self {
        Payload::Encoded {
            text: text.into(),
            raw: OnceCell::new(),
        }
    }

    /// Replaces the payload with raw bytes, discarding any encoded text.
    pub fn set_raw(&mut self, bytes: impl Into<Vec<u8>>) {
        *self = Payload::from_raw(bytes);
    }

    /// Replaces the payload with base64 text, discarding any raw bytes.
    pub fn set_encoded(&mut self, text: impl Into<String>) {
        *self = Payload::from_encoded(text);
    }

    /// Removes the payload entirely.
    pub fn clear(&mut self) {
        *self = Payload::Empty;
    }

    /// Returns `true` if either view holds a value.
    pub fn is_present(&self) -> bool {
        !matches!(self, Payload::Empty)
    }

    /// Returns the raw bytes, decoding and caching them from the base64
    /// view if necessary.
    ///
    /// # Errors
    ///
    /// [`PayloadError::Decoding`] if the stored text is not standard,
    /// padded base64. Nothing is cached on failure.
    pub fn raw(&self) -> Result<Option<&[u8]>, PayloadError> {
        match self {
            Payload::Empty => Ok(None),
            Payload::Raw { bytes, .. } => Ok(Some(bytes.as_slice())),
            Payload::Encoded { text, raw } => {
                if raw.get().is_none() {
                    let decoded = BASE64
                        .decode(text.as_bytes())
                        .map_err(|e| PayloadError::Decoding(e.to_string()))?;
                    let _ = raw.set(decoded);
                }
                Ok(raw.get().map(Vec::as_slice))
            }
        }
    }

    /// Returns the base64 text, encoding and caching it from the raw view
    /// if necessary.
    pub fn encoded(&self) -> Option<&str> {
        match self {
            Payload::Empty => None,
            Payload::Raw { bytes, encoded } => {
                Some(encoded.get_or_init(|| BASE64.encode(bytes)).as_str())
            }
            Payload::Encoded { text, .. } => Some(text.as_str()),
        }
    }

    /// Consumes the payload and returns its raw bytes.
    pub fn into_raw(self) -> Result<Option<Vec<u8>>, PayloadError> {
        match self {
            Payload::Empty => Ok(None),
            Payload::Raw { bytes, .. } => Ok(Some(bytes)),
            Payload::Encoded { text, raw } => match raw.into_inner() {
                Some(bytes) => Ok(Some(bytes)),
                None => BASE64
                    .decode(text.as_bytes())
                    .map(Some)
                    .map_err(|e| PayloadError::Decoding(e.to_string())),
            },
        }
    }
}

impl fmt::Debug for Payload {
    // Payloads can be megabytes; print the shape, not the contents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Empty => write!(f, "Payload::Empty"),
            Payload::Raw { bytes, encoded } => f
                .debug_struct("Payload::Raw")
                .field("len", &bytes.len())
                .field("encoded_cached", &encoded.get().is_some())
                .finish(),
            Payload::Encoded { text, raw } => f
                .debug_struct("Payload::Encoded")
                .field("len", &text.len())
                .field("raw_cached", &raw.get().is_some())
                .finish(),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::from_raw(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::from_raw(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_neither_view() {
        let payload = Payload::default();
        assert!(!payload.is_present());
        assert_eq!(payload.raw().unwrap(), None);
        assert_eq!(payload.encoded(), None);
    }

    #[test]
    fn raw_then_encoded_is_standard_base64() {
        let mut payload = Payload::default();
        payload.set_raw(b"hello world".to_vec());
        assert_eq!(payload.encoded(), Some("aGVsbG8gd29ybGQ="));
        assert_eq!(payload.raw().unwrap(), Some(&b"hello world"[..]));
    }

    #[test]
    fn encoded_then_raw_decodes() {
        let mut payload = Payload::default();
        payload.set_encoded("AAEC/w==");
        assert_eq!(payload.raw().unwrap(), Some(&[0u8, 1, 2, 255][..]));
        assert_eq!(payload.encoded(), Some("AAEC/w=="));
    }

    #[test]
    fn setting_raw_discards_cached_encoding() {
        let mut payload = Payload::from_raw(b"first".to_vec());
        assert_eq!(payload.encoded(), Some("Zmlyc3Q="));

        payload.set_raw(b"second".to_vec());
        assert_eq!(payload.encoded(), Some("c2Vjb25k"));
    }

    #[test]
    fn setting_encoded_discards_cached_bytes() {
        let mut payload = Payload::from_encoded("Zmlyc3Q=");
        assert_eq!(payload.raw().unwrap(), Some(&b"first"[..]));

        payload.set_encoded("c2Vjb25k");
        assert_eq!(payload.raw().unwrap(), Some(&b"second"[..]));
    }

    #[test]
    fn switching_views_never_returns_stale_value() {
        let mut payload = Payload::from_raw(b"abc".to_vec());
        let _ = payload.encoded();
        payload.set_encoded("eHl6");
        assert_eq!(payload.raw().unwrap(), Some(&b"xyz"[..]));
        payload.set_raw(b"123".to_vec());
        assert_eq!(payload.encoded(), Some("MTIz"));
    }

    #[test]
    fn malformed_base64_is_a_decoding_error() {
        let payload = Payload::from_encoded("not base64!!");
        assert!(matches!(payload.raw(), Err(PayloadError::Decoding(_))));
        // The text view is still available.
        assert_eq!(payload.encoded(), Some("not base64!!"));
    }

    #[test]
    fn unpadded_base64_is_rejected() {
        let payload = Payload::from_encoded("Zmlyc3Q");
        assert!(payload.raw().is_err());
    }

    #[test]
    fn empty_bytes_are_still_present() {
        let payload = Payload::from_raw(Vec::new());
        assert!(payload.is_present());
        assert_eq!(payload.encoded(), Some(""));
    }

    #[test]
    fn clear_removes_both_views() {
        let mut payload = Payload::from_raw(b"abc".to_vec());
        payload.clear();
        assert!(!payload.is_present());
    }

    #[test]
    fn into_raw_uses_cache_or_decodes() {
        let payload = Payload::from_encoded("YWJj");
        assert_eq!(payload.into_raw().unwrap(), Some(b"abc".to_vec()));

        let cached = Payload::from_encoded("YWJj");
        let _ = cached.raw().unwrap();
        assert_eq!(cached.into_raw().unwrap(), Some(b"abc".to_vec()));
    }

    #[test]
    fn debug_does_not_dump_contents() {
        let payload = Payload::from_raw(vec![0xAB; 4096]);
        let rendered = format!("{:?}", payload);
        assert!(rendered.contains("len: 4096"));
        assert!(rendered.len() < 100);
    }
}
