//! Thumbnail responses.
//!
//! A response answers exactly one request, identified by its nonce. On
//! success the thumbnail travels as the envelope payload; on failure the
//! `error` field says why.

use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::envelope::{envelope_fields, is_blank, Envelope};
use super::request::ThumbRequest;
use super::verification::ValidationError;
use super::Transaction;
use crate::codec::{
    expect_bool, optional_string, set_optional_string, FieldMap, FieldSpec, FieldTable,
};
use crate::config::{KEY_ERROR, KEY_SUCCESS};
use crate::error::PayloadError;

/// The result of a thumbnail request.
#[derive(Debug, Clone, Default)]
pub struct ThumbResponse {
    /// Nonce of the answered request, timestamp, checksum and thumbnail.
    pub envelope: Envelope,

    /// Whether the request was fulfilled.
    pub success: bool,

    /// What went wrong. Set exactly when `success` is false.
    pub error: Option<String>,
}

static RESPONSE_FIELDS: LazyLock<FieldTable<ThumbResponse>> =
    LazyLock::new(|| FieldTable::compose([envelope_fields(), response_fields()]));

fn response_fields() -> Vec<FieldSpec<ThumbResponse>> {
    vec![
        FieldSpec::new(
            KEY_SUCCESS,
            |resp: &ThumbResponse| Some(Value::Bool(resp.success)),
            |resp: &mut ThumbResponse, value| {
                resp.success = expect_bool(KEY_SUCCESS, value)?;
                Ok(())
            },
        ),
        FieldSpec::new(
            KEY_ERROR,
            |resp: &ThumbResponse| optional_string(&resp.error),
            |resp: &mut ThumbResponse, value| {
                set_optional_string(KEY_ERROR, &mut resp.error, value)
            },
        ),
    ]
}

impl ThumbResponse {
    /// An empty response, ready to be populated.
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful response to `request` carrying the generated thumbnail.
    ///
    /// The nonce is copied from the request; timestamp and checksum are
    /// left for [`Transaction::seal`].
    pub fn success_for(request: &ThumbRequest, thumbnail: impl Into<Vec<u8>>) -> Self {
        let mut response = Self::correlated(request);
        response.success = true;
        response.envelope.payload.set_raw(thumbnail);
        response
    }

    /// A failed response to `request` explaining what went wrong.
    pub fn failure_for(request: &ThumbRequest, error: impl Into<String>) -> Self {
        let mut response = Self::correlated(request);
        response.success = false;
        response.error = Some(error.into());
        response
    }

    /// Returns `true` if this response carries the (non-empty) nonce of
    /// `request`.
    pub fn answers(&self, request: &ThumbRequest) -> bool {
        match (self.nonce(), request.nonce()) {
            (Some(ours), Some(theirs)) => !ours.is_empty() && ours == theirs,
            _ => false,
        }
    }

    /// Consumes the response and returns the thumbnail bytes, if any.
    ///
    /// # Errors
    ///
    /// [`PayloadError::Decoding`] if the received `data` is not valid base64.
    pub fn into_thumbnail(self) -> Result<Option<Vec<u8>>, PayloadError> {
        self.envelope.payload.into_raw()
    }

    fn correlated(request: &ThumbRequest) -> Self {
        let mut response = Self::default();
        response.envelope.nonce = request.envelope.nonce.clone();
        response
    }
}

impl Transaction for ThumbResponse {
    const KIND: &'static str = "response";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn field_table() -> &'static FieldTable<Self> {
        &RESPONSE_FIELDS
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        if self.success {
            if !self.envelope.payload.is_present() {
                return Err(ValidationError::MissingPayload);
            }
        } else if is_blank(&self.error) {
            return Err(ValidationError::MissingError);
        }
        Ok(())
    }
}

impl Serialize for ThumbResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_field_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ThumbResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = FieldMap::deserialize(deserializer)?;
        Ok(Self::from_field_map(&map))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ThumbRequest {
        let mut req = ThumbRequest::new();
        req.envelope.nonce = Some("abc".into());
        req
    }

    fn enveloped(mut resp: ThumbResponse) -> ThumbResponse {
        resp.envelope.timestamp = 1000;
        resp.envelope.checksum = Some("00".into());
        resp
    }

    #[test]
    fn field_table_has_envelope_then_response_keys() {
        let keys: Vec<_> = ThumbResponse::field_table().keys().collect();
        assert_eq!(
            keys,
            vec!["nonce", "timestamp", "checksum", "data", "success", "error"]
        );
    }

    #[test]
    fn success_is_always_emitted() {
        let map = ThumbResponse::new().to_field_map();
        assert_eq!(map["success"], json!(false));
        assert!(!map.contains_key("error"));
    }

    #[test]
    fn success_for_copies_nonce_and_payload() {
        let resp = ThumbResponse::success_for(&request(), b"thumb".to_vec());
        assert!(resp.success);
        assert!(resp.answers(&request()));
        assert_eq!(resp.payload().raw().unwrap(), Some(&b"thumb"[..]));
        assert_eq!(resp.error, None);
    }

    #[test]
    fn failure_for_sets_error() {
        let resp = ThumbResponse::failure_for(&request(), "timeout");
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("timeout"));
        assert!(resp.answers(&request()));
    }

    #[test]
    fn answers_requires_matching_nonce() {
        let resp = ThumbResponse::failure_for(&request(), "timeout");
        let mut other = request();
        other.envelope.nonce = Some("xyz".into());
        assert!(!resp.answers(&other));
        assert!(!ThumbResponse::new().answers(&ThumbRequest::new()));
    }

    #[test]
    fn failure_with_error_is_complete() {
        let resp = enveloped(ThumbResponse::failure_for(&request(), "timeout"));
        assert!(resp.is_valid());
    }

    #[test]
    fn failure_without_error_is_incomplete() {
        let resp = enveloped(ThumbResponse::failure_for(&request(), ""));
        match resp.validate(None) {
            Err(ValidationError::MissingError) => {}
            other => panic!("expected MissingError, got {:?}", other),
        }
    }

    #[test]
    fn success_without_payload_is_incomplete() {
        let mut resp = enveloped(ThumbResponse::failure_for(&request(), "timeout"));
        resp.success = true;
        match resp.validate(None) {
            Err(ValidationError::MissingPayload) => {}
            other => panic!("expected MissingPayload, got {:?}", other),
        }
    }

    #[test]
    fn success_with_payload_is_complete() {
        let resp = enveloped(ThumbResponse::success_for(&request(), b"t".to_vec()));
        assert!(resp.is_valid());
    }

    #[test]
    fn decode_reads_boolean_success() {
        let resp = ThumbResponse::from_json(
            r#"{"nonce":"abc","timestamp":1000,"success":true,"data":"dGh1bWI="}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.payload().raw().unwrap(), Some(&b"thumb"[..]));
    }

    #[test]
    fn into_thumbnail_decodes_received_data() {
        let resp = ThumbResponse::from_json(r#"{"success":true,"data":"dGh1bWI="}"#).unwrap();
        assert_eq!(resp.into_thumbnail().unwrap(), Some(b"thumb".to_vec()));

        let bad = ThumbResponse::from_json(r#"{"success":true,"data":"!!"}"#).unwrap();
        assert!(bad.into_thumbnail().is_err());
        assert_eq!(ThumbResponse::new().into_thumbnail().unwrap(), None);
    }

    #[test]
    fn decode_ignores_string_success() {
        let resp = ThumbResponse::from_json(r#"{"success":"true","error":"x"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("x"));
    }

    #[test]
    fn serde_goes_through_the_field_table() {
        let resp = ThumbResponse::failure_for(&request(), "timeout");
        let text = serde_json::to_string(&resp).unwrap();
        let back: ThumbResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back.to_field_map(), resp.to_field_map());
    }
}
