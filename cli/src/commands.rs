//! Subcommand implementations.
//!
//! Each command is a plain function from input text to output text so the
//! binary's `main` only does I/O and dispatch.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use thumber_protocol::{RequestBuilder, ThumbRequest, ThumbResponse, Transaction};

use crate::cli::{Kind, RequestArgs};

/// Outcome of `thumber verify`, printed as JSON.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VerifyReport {
    pub valid: bool,
    pub reason: Option<String>,
}

/// Reads a document from `input`, or from stdin when it is absent or `-`.
pub fn read_document(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Decodes, seals and re-encodes a document.
pub fn sign(kind: Kind, json: &str, secret: &str) -> Result<String> {
    match kind {
        Kind::Request => sign_as::<ThumbRequest>(json, secret),
        Kind::Response => sign_as::<ThumbResponse>(json, secret),
    }
}

fn sign_as<T: Transaction>(json: &str, secret: &str) -> Result<String> {
    let mut tx = T::from_json(json).with_context(|| format!("failed to decode {}", T::KIND))?;
    tx.seal(secret)
        .with_context(|| format!("failed to seal {}", T::KIND))?;
    tracing::info!(kind = T::KIND, nonce = ?tx.nonce(), "document signed");
    Ok(tx.to_json()?)
}

/// Checks a document for completeness and a matching checksum.
///
/// Undecodable input is reported as invalid rather than failing the command.
pub fn verify(kind: Kind, json: &str, secret: &str) -> VerifyReport {
    let outcome = match kind {
        Kind::Request => verify_as::<ThumbRequest>(json, secret),
        Kind::Response => verify_as::<ThumbResponse>(json, secret),
    };
    match outcome {
        Ok(()) => VerifyReport {
            valid: true,
            reason: None,
        },
        Err(reason) => {
            tracing::warn!(%reason, "document rejected");
            VerifyReport {
                valid: false,
                reason: Some(reason),
            }
        }
    }
}

fn verify_as<T: Transaction>(json: &str, secret: &str) -> Result<(), String> {
    let tx = T::from_json(json).map_err(|e| e.to_string())?;
    tx.validate(Some(secret)).map_err(|e| e.to_string())
}

/// The canonical string of a document.
pub fn canonical(kind: Kind, json: &str) -> Result<String> {
    Ok(match kind {
        Kind::Request => ThumbRequest::from_json(json)?.canonical_string(),
        Kind::Response => ThumbResponse::from_json(json)?.canonical_string(),
    })
}

/// Builds and seals a request from command-line arguments.
pub fn request(args: &RequestArgs) -> Result<String> {
    let mut builder = RequestBuilder::new()
        .uid(args.uid.as_str())
        .callback(args.callback.as_str())
        .mime_type(args.mime_type.as_str())
        .page(args.page);

    if let Some(url) = &args.url {
        builder = builder.url(url.as_str());
    }
    if let Some(geometry) = &args.geometry {
        builder = builder.geometry(geometry.as_str());
    }
    if let Some(path) = &args.file {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        builder = builder.file(bytes);
    }

    let request = builder
        .build_sealed(&args.secret)
        .context("failed to seal request")?;
    tracing::info!(nonce = ?request.nonce(), inline = request.has_inline_file(), "request built");
    Ok(request.to_json()?)
}
