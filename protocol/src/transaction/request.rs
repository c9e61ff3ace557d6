//! Thumbnail requests.
//!
//! A request names the API user, where the result should be delivered, and
//! the file to thumbnail: either by URL or inline as the envelope payload.

use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::envelope::{envelope_fields, is_blank, Envelope};
use super::verification::ValidationError;
use super::Transaction;
use crate::codec::{
    expect_i32, optional_string, set_optional_string, FieldMap, FieldSpec, FieldTable,
};
use crate::config::{KEY_CALLBACK, KEY_GEOMETRY, KEY_MIME_TYPE, KEY_PAGE, KEY_UID, KEY_URL};

/// A request to generate a thumbnail.
///
/// | field          | wire key    |
/// |----------------|-------------|
/// | `user_id`      | `uid`       |
/// | `callback_url` | `callback`  |
/// | `source_url`   | `url`       |
/// | `geometry`     | `geometry`  |
/// | `page`         | `pg`        |
/// | `mime_type`    | `mime_type` |
#[derive(Debug, Clone, Default)]
pub struct ThumbRequest {
    /// Nonce, timestamp, checksum and the optional inline file.
    pub envelope: Envelope,

    /// API user the request is billed to and whose secret signs it.
    pub user_id: Option<String>,

    /// URL the generated thumbnail will be POSTed to.
    pub callback_url: Option<String>,

    /// Where the file to thumbnail can be fetched. May be absent when the
    /// file travels inline as the payload.
    pub source_url: Option<String>,

    /// Target size, as an ImageMagick geometry string (e.g. `"150x150>"`).
    pub geometry: Option<String>,

    /// 1-indexed page of a multi-page document. Zero leaves the choice to
    /// the server. Signed, since peers may send any 32-bit integer and it
    /// must survive decoding for their checksum to verify.
    pub page: i32,

    /// MIME type of the source file.
    pub mime_type: Option<String>,
}

static REQUEST_FIELDS: LazyLock<FieldTable<ThumbRequest>> =
    LazyLock::new(|| FieldTable::compose([envelope_fields(), request_fields()]));

fn request_fields() -> Vec<FieldSpec<ThumbRequest>> {
    vec![
        FieldSpec::new(
            KEY_UID,
            |req: &ThumbRequest| optional_string(&req.user_id),
            |req: &mut ThumbRequest, value| {
                set_optional_string(KEY_UID, &mut req.user_id, value)
            },
        ),
        FieldSpec::new(
            KEY_CALLBACK,
            |req: &ThumbRequest| optional_string(&req.callback_url),
            |req: &mut ThumbRequest, value| {
                set_optional_string(KEY_CALLBACK, &mut req.callback_url, value)
            },
        ),
        FieldSpec::new(
            KEY_URL,
            |req: &ThumbRequest| optional_string(&req.source_url),
            |req: &mut ThumbRequest, value| {
                set_optional_string(KEY_URL, &mut req.source_url, value)
            },
        ),
        FieldSpec::new(
            KEY_GEOMETRY,
            |req: &ThumbRequest| optional_string(&req.geometry),
            |req: &mut ThumbRequest, value| {
                set_optional_string(KEY_GEOMETRY, &mut req.geometry, value)
            },
        ),
        FieldSpec::new(
            KEY_PAGE,
            |req: &ThumbRequest| Some(Value::from(req.page)),
            |req: &mut ThumbRequest, value| {
                req.page = expect_i32(KEY_PAGE, value)?;
                Ok(())
            },
        ),
        FieldSpec::new(
            KEY_MIME_TYPE,
            |req: &ThumbRequest| optional_string(&req.mime_type),
            |req: &mut ThumbRequest, value| {
                set_optional_string(KEY_MIME_TYPE, &mut req.mime_type, value)
            },
        ),
    ]
}

impl ThumbRequest {
    /// An empty request, ready to be populated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the file to thumbnail inline, replacing any previous payload.
    pub fn set_file(&mut self, bytes: impl Into<Vec<u8>>) {
        self.envelope.payload.set_raw(bytes);
    }

    /// Returns `true` if the file travels inline rather than by URL.
    pub fn has_inline_file(&self) -> bool {
        self.envelope.payload.is_present()
    }
}

impl Transaction for ThumbRequest {
    const KIND: &'static str = "request";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn field_table() -> &'static FieldTable<Self> {
        &REQUEST_FIELDS
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        for (field, slot) in [
            (KEY_UID, &self.user_id),
            (KEY_CALLBACK, &self.callback_url),
            (KEY_MIME_TYPE, &self.mime_type),
        ] {
            if is_blank(slot) {
                return Err(ValidationError::MissingField { field });
            }
        }
        if self.source_url.is_none() && !self.envelope.payload.is_present() {
            return Err(ValidationError::MissingSource);
        }
        Ok(())
    }
}

impl Serialize for ThumbRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_field_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ThumbRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = FieldMap::deserialize(deserializer)?;
        Ok(Self::from_field_map(&map))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
