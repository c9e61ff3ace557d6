//! Terminal walkthrough of one Thumber exchange.
//!
//! Builds and seals a request, sends it "over the wire" as JSON text,
//! verifies it on the service side, shows what tampering does, and answers
//! with a sealed response.
//!
//! Run with:
//!   cargo run --example demo

use std::time::Instant;

use serde_json::Value;

use thumber_protocol::{RequestBuilder, ThumbRequest, ThumbResponse, Transaction};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const SECRET: &str = "s3cr3t";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]========================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn verdict(label: &str, ok: bool) {
    if ok {
        println!("{GREEN}  [OK] {label}{RESET}");
    } else {
        println!("{RED}  [REJECTED] {label}{RESET}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    section(1, "Client builds and seals a request");
    let request = RequestBuilder::new()
        .uid("u1")
        .callback("http://cb")
        .url("http://src/img.png")
        .mime_type("image/png")
        .geometry("150x150")
        .build_sealed(SECRET)?;
    info("canonical", &request.canonical_string());
    info("checksum", request.checksum().unwrap_or_default());

    let wire = request.to_json()?;
    info("wire", &wire);

    section(2, "Service decodes and verifies");
    let received = ThumbRequest::from_json(&wire)?;
    verdict("request accepted", received.is_valid_with_secret(SECRET));

    section(3, "A forged mime_type is caught");
    let mut doc: Value = serde_json::from_str(&wire)?;
    doc["mime_type"] = Value::from("image/jpeg");
    let forged = ThumbRequest::from_json(&doc.to_string())?;
    match forged.validate(Some(SECRET)) {
        Ok(()) => verdict("forged request", true),
        Err(reason) => {
            verdict("forged request", false);
            println!("{DIM}  reason: {reason}{RESET}");
        }
    }

    section(4, "Service answers with a thumbnail");
    let mut response = ThumbResponse::success_for(&received, vec![0x89, b'P', b'N', b'G']);
    response.seal(SECRET)?;
    info("wire", &response.to_json()?);
    verdict("response answers request", response.answers(&request));
    verdict("response verifies", response.is_valid_with_secret(SECRET));

    section(5, "Client unpacks the thumbnail");
    let delivered = ThumbResponse::from_json(&response.to_json()?)?;
    let thumbnail = delivered.into_thumbnail()?.unwrap_or_default();
    info("thumbnail bytes", &thumbnail.len().to_string());

    println!();
    println!(
        "{DIM}  done in {:.2} ms{RESET}",
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
