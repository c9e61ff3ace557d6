//! # Message Authentication
//!
//! HMAC-SHA256 over arbitrary bytes, keyed by the user's shared secret.
//! Every Thumber checksum is produced and checked through this module.
//!
//! The digest is rendered as fixed-width lowercase hex. Older clients printed
//! the digest as a big integer, which silently drops leading zero nibbles;
//! those checksums are one or more characters short and are rejected here.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::CHECKSUM_DIGEST_LENGTH;
use crate::error::TransactionError;

type HmacSha256 = Hmac<Sha256>;

/// Compute the raw HMAC-SHA256 digest of `message` under `key`.
///
/// # Errors
///
/// Returns [`TransactionError::ChecksumComputation`] if the MAC cannot be
/// keyed. HMAC accepts keys of any length, so in practice this only fires
/// if the underlying primitive itself is broken; it is still surfaced
/// rather than papered over with an empty digest.
pub fn hmac_sha256(
    key: &[u8],
    message: &[u8],
) -> Result<[u8; CHECKSUM_DIGEST_LENGTH], TransactionError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| TransactionError::ChecksumComputation(e.to_string()))?;
    mac.update(message);

    let mut output = [0u8; CHECKSUM_DIGEST_LENGTH];
    output.copy_from_slice(&mac.finalize().into_bytes());
    Ok(output)
}

/// Compute HMAC-SHA256 and render it as 64 lowercase hex characters.
///
/// # Example
///
/// ```
/// use thumber_protocol::crypto::hmac_sha256_hex;
///
/// let checksum = hmac_sha256_hex(b"secret", b"nonce=abc").unwrap();
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> Result<String, TransactionError> {
    hmac_sha256(key, message).map(hex::encode)
}

/// Compare two checksum strings without leaking the position of the first
/// differing byte.
///
/// Lengths are compared first; checksums are public-length values so an
/// early return on length mismatch reveals nothing an attacker does not
/// already know.
pub fn checksums_match(expected: &str, actual: &str) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    expected.as_bytes().ct_eq(actual.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4231_test_case_2() {
        // Key = "Jefe", data = "what do ya want for nothing?"
        let digest = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn empty_key_and_message_are_accepted() {
        let digest = hmac_sha256_hex(b"", b"").unwrap();
        assert_eq!(
            digest,
            "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad"
        );
    }

    #[test]
    fn hex_is_fixed_width_lowercase() {
        for i in 0..64u8 {
            let digest = hmac_sha256_hex(&[i], b"payload").unwrap();
            assert_eq!(digest.len(), 64);
            assert!(digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn different_keys_produce_different_digests() {
        let a = hmac_sha256_hex(b"key-a", b"message").unwrap();
        let b = hmac_sha256_hex(b"key-b", b"message").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn checksums_match_requires_exact_equality() {
        assert!(checksums_match("abc123", "abc123"));
        assert!(!checksums_match("abc123", "abc124"));
        assert!(!checksums_match("abc123", "abc12"));
        assert!(!checksums_match("abc123", "ABC123"));
        assert!(checksums_match("", ""));
    }
}
