//! # Transaction Module
//!
//! The two Thumber messages and everything they share.
//!
//! ## Architecture
//!
//! ```text
//! envelope.rs    : nonce, timestamp, checksum, payload; the shared field group
//! request.rs     : ThumbRequest, what to thumbnail and where to deliver it
//! response.rs    : ThumbResponse, the thumbnail, or why there is none
//! builder.rs     : fluent RequestBuilder for outbound requests
//! signing.rs     : checksum signing and sealing of outbound transactions
//! verification.rs: structural, variant and checksum validation
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Populate**: set fields directly, use [`RequestBuilder`], or decode
//!    with [`Transaction::from_json`].
//! 2. **Seal**: [`Transaction::seal`] fills a default nonce and timestamp if
//!    missing, then computes and stores the checksum.
//! 3. **Send**: [`Transaction::to_json`] is the whole contract a transport needs.
//! 4. **Verify**: the receiver decodes and calls
//!    [`Transaction::is_valid_with_secret`] (or [`Transaction::validate`] for
//!    the reason a document was rejected).

pub mod builder;
pub mod envelope;
pub mod request;
pub mod response;
pub mod signing;
pub mod verification;

pub use builder::RequestBuilder;
pub use envelope::Envelope;
pub use request::ThumbRequest;
pub use response::ThumbResponse;
pub use signing::{seal_transaction, sign_transaction};
pub use verification::{validate_transaction, ValidationError};

use crate::checksum;
use crate::codec::{parse_object, render_object, FieldMap, FieldTable};
use crate::error::TransactionError;
use crate::payload::Payload;

/// Behavior shared by every Thumber message.
///
/// Implementors provide access to their [`Envelope`], their static field
/// table, and their own completeness rule. Everything else (codec,
/// checksum, validation, sealing) is provided on top of those.
pub trait Transaction: Default + Sized + 'static {
    /// Short name used in log records.
    const KIND: &'static str;

    /// The shared envelope fields.
    fn envelope(&self) -> &Envelope;

    /// Mutable access to the shared envelope fields.
    fn envelope_mut(&mut self) -> &mut Envelope;

    /// Every wire field of this type: envelope entries first, then the
    /// variant's own. Built once per type and reused forever.
    fn field_table() -> &'static FieldTable<Self>;

    /// Variant-specific completeness. Envelope completeness is checked
    /// separately and both must hold.
    fn validate_fields(&self) -> Result<(), ValidationError>;

    // -----------------------------------------------------------------------
    // Codec
    // -----------------------------------------------------------------------

    /// Builds a transaction from an already-parsed field map. Unknown keys
    /// and values that fail to apply are logged and skipped.
    fn from_field_map(map: &FieldMap) -> Self {
        let mut tx = Self::default();
        Self::field_table().apply(&mut tx, map);
        tx
    }

    /// Decodes a transaction from JSON text.
    ///
    /// # Errors
    ///
    /// [`TransactionError::Parse`] if the text is not a JSON object. Field
    /// level problems never fail the decode.
    fn from_json(json: &str) -> Result<Self, TransactionError> {
        let map = parse_object(json)?;
        Ok(Self::from_field_map(&map))
    }

    /// Every field with a present value, keyed by wire name.
    fn to_field_map(&self) -> FieldMap {
        Self::field_table().collect(self)
    }

    /// Encodes the transaction as JSON text. Absent fields are omitted.
    fn to_json(&self) -> Result<String, TransactionError> {
        render_object(&self.to_field_map())
    }

    // -----------------------------------------------------------------------
    // Checksum
    // -----------------------------------------------------------------------

    /// The canonical string the checksum is computed over.
    fn canonical_string(&self) -> String {
        checksum::canonicalize(&self.to_field_map())
    }

    /// Computes the checksum of the current field values under `secret`.
    /// The stored `checksum` never contributes to its own computation.
    fn compute_checksum(&self, secret: &str) -> Result<String, TransactionError> {
        checksum::compute_checksum(&self.to_field_map(), secret)
    }

    /// Returns `true` if the stored checksum matches the current contents.
    fn is_valid_checksum(&self, secret: &str) -> bool {
        verification::verify_checksum(self, secret).is_ok()
    }

    /// Computes the checksum and stores it in the envelope.
    fn sign(&mut self, secret: &str) -> Result<&Self, TransactionError> {
        sign_transaction(self, secret)
    }

    /// Fills a default nonce and the current timestamp where unset, then
    /// signs.
    fn seal(&mut self, secret: &str) -> Result<&Self, TransactionError> {
        seal_transaction(self, secret)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Runs every check and reports the first failure. With `secret`, the
    /// checksum is verified as well.
    fn validate(&self, secret: Option<&str>) -> Result<(), ValidationError> {
        validate_transaction(self, secret)
    }

    /// Structural and variant completeness, without checksum verification.
    fn is_valid(&self) -> bool {
        self.validate(None).is_ok()
    }

    /// Completeness plus checksum verification under `secret`.
    fn is_valid_with_secret(&self, secret: &str) -> bool {
        self.validate(Some(secret)).is_ok()
    }

    // -----------------------------------------------------------------------
    // Envelope shortcuts
    // -----------------------------------------------------------------------

    /// The correlation nonce, if set.
    fn nonce(&self) -> Option<&str> {
        self.envelope().nonce.as_deref()
    }

    /// Seconds since the epoch; zero when unset.
    fn timestamp(&self) -> i64 {
        self.envelope().timestamp
    }

    /// The stored checksum, if any.
    fn checksum(&self) -> Option<&str> {
        self.envelope().checksum.as_deref()
    }

    /// The payload in both views.
    fn payload(&self) -> &Payload {
        &self.envelope().payload
    }

    /// Mutable access to the payload.
    fn payload_mut(&mut self) -> &mut Payload {
        &mut self.envelope_mut().payload
    }
}
