//! # Cryptographic Primitives for Thumber
//!
//! Thin, type-safe wrappers around audited implementations:
//!
//! - **HMAC-SHA256** for transaction checksums (`hmac` + `sha2`).
//! - **SHA-256** for deriving default nonces from the wall clock.
//! - **Constant-time comparison** for checksum verification (`subtle`).

pub mod hash;
pub mod mac;

pub use hash::{nonce_from_millis, sha256_array};
pub use mac::{checksums_match, hmac_sha256, hmac_sha256_hex};
