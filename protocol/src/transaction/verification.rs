//! Transaction validation: structural, variant and checksum checks.
//!
//! The checks run cheapest first and stop at the first failure:
//!
//! 1. **Envelope**: nonce, timestamp and checksum are present.
//! 2. **Variant**: the request or response carries its required fields.
//! 3. **Checksum**: only when a secret is supplied: the stored checksum
//!    equals the HMAC of the canonical string.
//!
//! Validation never panics and never throws away the transaction; callers
//! branch on the result and may re-run it after fixing fields.

use thiserror::Error;
use tracing::debug;

use super::Transaction;
use crate::config::CHECKSUM_HEX_LENGTH;
use crate::crypto::mac::checksums_match;
use crate::error::TransactionError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a transaction is not valid.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The envelope has no nonce.
    #[error("nonce is missing")]
    MissingNonce,

    /// The envelope timestamp is zero.
    #[error("timestamp is unset")]
    MissingTimestamp,

    /// The envelope has no checksum.
    #[error("checksum is missing")]
    MissingChecksum,

    /// A field the variant requires is absent or empty.
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },

    /// A request names neither a source URL nor an inline payload.
    #[error("request needs a source url or an inline payload")]
    MissingSource,

    /// A successful response carries no thumbnail.
    #[error("successful response carries no payload")]
    MissingPayload,

    /// A failed response carries no error message.
    #[error("failed response carries no error message")]
    MissingError,

    /// The stored checksum does not match the transaction contents.
    #[error("checksum does not match transaction contents")]
    ChecksumMismatch,

    /// The expected checksum could not be computed.
    #[error(transparent)]
    Checksum(#[from] TransactionError),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates a transaction, optionally verifying its checksum.
///
/// # Errors
///
/// The first failing check, as a [`ValidationError`].
pub fn validate_transaction<T: Transaction>(
    tx: &T,
    secret: Option<&str>,
) -> Result<(), ValidationError> {
    tx.envelope().validate()?;
    tx.validate_fields()?;

    if let Some(secret) = secret {
        verify_checksum(tx, secret)?;
    }
    Ok(())
}

/// Recomputes the checksum under `secret` and compares it with the stored
/// one in constant time.
///
/// A stored checksum that is not exactly [`CHECKSUM_HEX_LENGTH`] characters
/// long is rejected before any HMAC work.
pub fn verify_checksum<T: Transaction>(tx: &T, secret: &str) -> Result<(), ValidationError> {
    let stored = tx.checksum().ok_or(ValidationError::MissingChecksum)?;
    if stored.len() != CHECKSUM_HEX_LENGTH {
        debug!(kind = T::KIND, len = stored.len(), "checksum has wrong length");
        return Err(ValidationError::ChecksumMismatch);
    }
    let expected = tx.compute_checksum(secret)?;

    if checksums_match(&expected, stored) {
        Ok(())
    } else {
        debug!(kind = T::KIND, nonce = ?tx.nonce(), "checksum mismatch");
        Err(ValidationError::ChecksumMismatch)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
