//! Checksum signing for outbound transactions.
//!
//! Signing is a separate step from building because the shared secret may
//! not be known when the transaction is assembled, and because any field
//! change after signing invalidates the checksum. Sign last, right before
//! encoding.

use tracing::debug;

use super::envelope::is_blank;
use super::Transaction;
use crate::error::TransactionError;

/// Computes the checksum of `tx` under `secret` and stores it in the
/// envelope, overwriting any previous value.
///
/// The nonce and timestamp are signed as they are; use [`seal_transaction`]
/// to have them filled in first.
///
/// # Errors
///
/// [`TransactionError::ChecksumComputation`] if the HMAC fails. The stored
/// checksum is left untouched in that case.
pub fn sign_transaction<'a, T: Transaction>(
    tx: &'a mut T,
    secret: &str,
) -> Result<&'a T, TransactionError> {
    let checksum = tx.compute_checksum(secret)?;
    tx.envelope_mut().checksum = Some(checksum);
    Ok(tx)
}

/// Prepares `tx` for sending in one step.
///
/// 1. If the nonce is missing or empty, derive one from the current time.
/// 2. If the timestamp is zero, set it to now.
/// 3. Compute and store the checksum.
///
/// A caller-supplied nonce or timestamp is never replaced.
///
/// # Example
///
/// ```
/// use thumber_protocol::transaction::{RequestBuilder, Transaction};
///
/// let mut req = RequestBuilder::new()
///     .uid("u1")
///     .callback("http://cb")
///     .url("http://src/img.png")
///     .mime_type("image/png")
///     .build();
///
/// req.seal("s3cr3t").unwrap();
/// assert!(req.is_valid_with_secret("s3cr3t"));
/// ```
pub fn seal_transaction<'a, T: Transaction>(
    tx: &'a mut T,
    secret: &str,
) -> Result<&'a T, TransactionError> {
    let envelope = tx.envelope_mut();
    if is_blank(&envelope.nonce) {
        envelope.set_default_nonce();
    }
    if envelope.timestamp == 0 {
        envelope.stamp_now();
    }

    sign_transaction(tx, secret)?;
    debug!(
        kind = T::KIND,
        nonce = ?tx.nonce(),
        timestamp = tx.timestamp(),
        "transaction sealed"
    );
    Ok(tx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
