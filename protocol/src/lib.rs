// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Thumber Protocol: Message Model
//!
//! The wire format spoken between Thumber clients and the remote
//! thumbnailing service. A client asks for a thumbnail with a
//! [`ThumbRequest`]; the service answers, usually via the request's
//! callback URL, with a [`ThumbResponse`]. Both travel as flat JSON objects
//! and both are authenticated by an HMAC-SHA256 checksum keyed with the API
//! user's shared secret.
//!
//! There is no transport here. Moving JSON text around is the caller's
//! business.
//!
//! ## Architecture
//!
//! - **config**: Wire keys and protocol constants.
//! - **error**: Error types for decoding, encoding and checksumming.
//! - **crypto**: SHA-256 nonce digests, HMAC-SHA256, constant-time compare.
//! - **codec**: Field tables mapping typed messages to JSON objects.
//! - **checksum**: Canonical string construction and the checksum itself.
//! - **payload**: Binary payload with raw and base64 views.
//! - **transaction**: Envelope, request, response, building, signing and
//!   validation.
//!
//! ## Quick Start
//!
//! ```
//! use thumber_protocol::{RequestBuilder, ThumbRequest, ThumbResponse, Transaction};
//!
//! // Client side.
//! let request = RequestBuilder::new()
//!     .uid("u1")
//!     .callback("http://cb")
//!     .url("http://src/img.png")
//!     .mime_type("image/png")
//!     .build_sealed("s3cr3t")
//!     .unwrap();
//! let wire = request.to_json().unwrap();
//!
//! // Service side.
//! let received = ThumbRequest::from_json(&wire).unwrap();
//! assert!(received.is_valid_with_secret("s3cr3t"));
//!
//! let mut response = ThumbResponse::success_for(&received, b"\x89PNG".to_vec());
//! response.seal("s3cr3t").unwrap();
//! assert!(response.answers(&request));
//! ```

pub mod checksum;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod transaction;

pub use error::{FieldError, PayloadError, TransactionError};
pub use payload::Payload;
pub use transaction::{
    Envelope, RequestBuilder, ThumbRequest, ThumbResponse, Transaction, ValidationError,
};
