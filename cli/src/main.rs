// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Thumber CLI
//!
//! Entry point for the `thumber` binary. Parses CLI arguments, initializes
//! logging, and runs one subcommand:
//!
//! - `sign`     : seal a request or response document
//! - `verify`   : check a document and print a JSON report
//! - `request`  : build and seal a new request
//! - `canonical`: print the string a checksum is computed over
//! - `version`  : print build version information

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use cli::{Commands, ThumberCli};

fn main() -> Result<ExitCode> {
    let cli = ThumberCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format);

    match cli.command {
        Commands::Sign(args) => {
            let json = commands::read_document(args.document.input.as_deref())?;
            println!("{}", commands::sign(args.document.kind, &json, &args.secret)?);
        }
        Commands::Verify(args) => {
            let json = commands::read_document(args.document.input.as_deref())?;
            let report = commands::verify(args.document.kind, &json, &args.secret);
            println!(
                "{}",
                serde_json::to_string(&report).context("failed to encode report")?
            );
            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Request(args) => {
            println!("{}", commands::request(&args)?);
        }
        Commands::Canonical(args) => {
            let json = commands::read_document(args.document.input.as_deref())?;
            println!("{}", commands::canonical(args.document.kind, &json)?);
        }
        Commands::Version => print_version(),
    }

    Ok(ExitCode::SUCCESS)
}

/// Prints version information to stdout.
fn print_version() {
    println!("thumber  {}", env!("CARGO_PKG_VERSION"));
    println!("protocol {}", thumber_protocol::config::PROTOCOL_VERSION);
}
