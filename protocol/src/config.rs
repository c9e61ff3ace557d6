//! # Protocol Configuration & Constants
//!
//! Every magic number of the Thumber transaction protocol lives here. The
//! wire keys and the canonicalization limits are shared with every other
//! Thumber client and server, so changing any of them breaks checksum
//! interoperability with deployed peers.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Crate-level protocol version. Not part of the wire format; the envelope
/// carries no version field.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Wire Keys: Envelope
// ---------------------------------------------------------------------------

/// Correlates a request with its response.
pub const KEY_NONCE: &str = "nonce";

/// Seconds since the Unix epoch at which the transaction was produced.
pub const KEY_TIMESTAMP: &str = "timestamp";

/// HMAC-SHA256 signature over every other field.
pub const KEY_CHECKSUM: &str = "checksum";

/// Base64 text of the binary payload.
pub const KEY_DATA: &str = "data";

// ---------------------------------------------------------------------------
// Wire Keys: Request
// ---------------------------------------------------------------------------

/// API user identity.
pub const KEY_UID: &str = "uid";

/// URL the generated thumbnail is POSTed to.
pub const KEY_CALLBACK: &str = "callback";

/// URL of the file to thumbnail.
pub const KEY_URL: &str = "url";

/// Target-size geometry string (ImageMagick syntax, opaque to this crate).
pub const KEY_GEOMETRY: &str = "geometry";

/// 1-indexed page selector for multi-page documents.
pub const KEY_PAGE: &str = "pg";

/// MIME type of the source file.
pub const KEY_MIME_TYPE: &str = "mime_type";

// ---------------------------------------------------------------------------
// Wire Keys: Response
// ---------------------------------------------------------------------------

/// Whether the related request succeeded.
pub const KEY_SUCCESS: &str = "success";

/// What went wrong when `success` is false.
pub const KEY_ERROR: &str = "error";

// ---------------------------------------------------------------------------
// Checksum Parameters
// ---------------------------------------------------------------------------

/// Each value contributes at most this many UTF-16 code units to the
/// canonical string. Keeps the HMAC input bounded even when `data` carries
/// megabytes. Counted in UTF-16 units so that peers measuring string length
/// that way cut at the same place.
pub const MAX_CANONICAL_VALUE_UNITS: usize = 1024;

/// Separator between a key and its value in the canonical string.
pub const CANONICAL_PAIR_SEPARATOR: char = '=';

/// Separator between entries in the canonical string.
pub const CANONICAL_ENTRY_SEPARATOR: char = '&';

/// HMAC-SHA256 digest length in bytes.
pub const CHECKSUM_DIGEST_LENGTH: usize = 32;

/// Checksums are always rendered as fixed-width lowercase hex: two
/// characters per digest byte, leading zeros kept.
pub const CHECKSUM_HEX_LENGTH: usize = CHECKSUM_DIGEST_LENGTH * 2;

// ---------------------------------------------------------------------------
// Nonce Generation
// ---------------------------------------------------------------------------

/// Number of SHA-256 digest bytes kept when deriving a default nonce from
/// the wall clock. 16 bytes gives the same 32-character nonce older
/// MD5-based clients produced.
pub const NONCE_DIGEST_BYTES: usize = 16;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
