//! # Hashing Utilities
//!
//! SHA-256 helpers and default nonce derivation. The checksum itself is an
//! HMAC and lives in [`super::mac`]; plain digests are only needed to turn
//! a wall-clock reading into an opaque, fixed-length nonce.

use sha2::{Digest, Sha256};

use crate::config::NONCE_DIGEST_BYTES;

/// Compute the SHA-256 hash and return a fixed-size array.
///
/// # Example
///
/// ```
/// use thumber_protocol::crypto::sha256_array;
///
/// let hash = sha256_array(b"thumber");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Derive a nonce from a wall-clock reading in milliseconds.
///
/// The decimal rendering of `millis` is hashed with SHA-256 and the first
/// [`NONCE_DIGEST_BYTES`] bytes are hex-encoded, giving a 32-character
/// lowercase nonce. Two calls within the same millisecond collide; callers
/// that need stronger uniqueness should supply their own nonce.
pub fn nonce_from_millis(millis: i64) -> String {
    let digest = sha256_array(millis.to_string().as_bytes());
    hex::encode(&digest[..NONCE_DIGEST_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let hash = sha256_array(b"");
        assert_eq!(
            hex::encode(hash),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn nonce_is_32_lowercase_hex_chars() {
        let nonce = nonce_from_millis(1_700_000_000_123);
        assert_eq!(nonce.len(), NONCE_DIGEST_BYTES * 2);
        assert!(nonce
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn nonce_is_deterministic_per_millisecond() {
        assert_eq!(nonce_from_millis(42), nonce_from_millis(42));
        assert_ne!(nonce_from_millis(42), nonce_from_millis(43));
    }

    #[test]
    fn nonce_is_prefix_of_sha256_of_decimal_string() {
        let full = hex::encode(sha256_array(b"1000"));
        assert!(full.starts_with(&nonce_from_millis(1000)));
    }
}
