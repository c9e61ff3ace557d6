//! Request construction via the builder pattern.
//!
//! The [`RequestBuilder`] collects the request fields and hands back an
//! unsigned [`ThumbRequest`]. Signing is a separate step (see
//! [`super::signing`]) unless [`RequestBuilder::build_sealed`] is used.

use super::envelope::Envelope;
use super::request::ThumbRequest;
use super::Transaction;
use crate::error::TransactionError;
use crate::payload::Payload;

/// Fluent builder for outbound [`ThumbRequest`]s.
///
/// # Usage
///
/// ```
/// use thumber_protocol::transaction::{RequestBuilder, Transaction};
///
/// let req = RequestBuilder::new()
///     .uid("u1")
///     .callback("https://example.com/thumbs")
///     .url("https://example.com/report.pdf")
///     .mime_type("application/pdf")
///     .geometry("300x300")
///     .page(2)
///     .build_sealed("s3cr3t")
///     .unwrap();
///
/// assert!(req.is_valid_with_secret("s3cr3t"));
/// ```
///
/// Nothing is defaulted at build time: nonce and timestamp stay unset until
/// the request is sealed, so a built request can still be inspected or
/// modified before it is signed.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    nonce: Option<String>,
    timestamp: i64,
    user_id: Option<String>,
    callback_url: Option<String>,
    source_url: Option<String>,
    geometry: Option<String>,
    page: i32,
    mime_type: Option<String>,
    payload: Payload,
}

impl RequestBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API user identity.
    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.user_id = Some(uid.into());
        self
    }

    /// Sets the URL the thumbnail will be delivered to.
    pub fn callback(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Sets the URL of the file to thumbnail.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Sets the target geometry string.
    pub fn geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    /// Selects a page of a multi-page document (1-indexed).
    pub fn page(mut self, page: i32) -> Self {
        self.page = page;
        self
    }

    /// Sets the MIME type of the source file.
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Attaches the file inline as raw bytes.
    pub fn file(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.payload.set_raw(bytes);
        self
    }

    /// Attaches the file inline as already-encoded base64 text.
    pub fn encoded_file(mut self, text: impl Into<String>) -> Self {
        self.payload.set_encoded(text);
        self
    }

    /// Sets the nonce explicitly instead of deriving one when sealing.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Sets the timestamp explicitly (Unix seconds).
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Consumes the builder and produces an unsigned request.
    pub fn build(self) -> ThumbRequest {
        ThumbRequest {
            envelope: Envelope {
                nonce: self.nonce,
                timestamp: self.timestamp,
                checksum: None,
                payload: self.payload,
            },
            user_id: self.user_id,
            callback_url: self.callback_url,
            source_url: self.source_url,
            geometry: self.geometry,
            page: self.page,
            mime_type: self.mime_type,
        }
    }

    /// Builds the request and seals it with `secret`.
    pub fn build_sealed(self, secret: &str) -> Result<ThumbRequest, TransactionError> {
        let mut request = self.build();
        request.seal(secret)?;
        Ok(request)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
