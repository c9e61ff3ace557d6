//! # CLI Interface
//!
//! Defines the command-line argument structure for `thumber` using `clap`
//! derive. Five subcommands: `sign`, `verify`, `request`, `canonical` and
//! `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Sign, verify and inspect Thumber messages.
///
/// Documents are read from `--input` or stdin and written to stdout. Logs go
/// to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "thumber",
    about = "Sign, verify and inspect Thumber messages",
    version,
    propagate_version = true
)]
pub struct ThumberCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "THUMBER_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seal a JSON document: fill nonce and timestamp if unset, then sign.
    Sign(SignArgs),
    /// Check a JSON document for completeness and a matching checksum.
    Verify(VerifyArgs),
    /// Build and seal a new thumbnail request.
    Request(RequestArgs),
    /// Print the canonical string a document's checksum is computed over.
    Canonical(CanonicalArgs),
    /// Print version information and exit.
    Version,
}

/// Which message a document holds.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Request,
    Response,
}

/// Where to read a document from.
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Message kind.
    #[arg(long, short = 'k', value_enum, default_value_t = Kind::Request)]
    pub kind: Kind,

    /// JSON file to read. Reads stdin when omitted or `-`.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Shared secret of the API user.
    #[arg(long, short = 's', env = "THUMBER_SECRET", hide_env_values = true)]
    pub secret: String,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Shared secret of the API user.
    #[arg(long, short = 's', env = "THUMBER_SECRET", hide_env_values = true)]
    pub secret: String,
}

/// Arguments for the `request` subcommand.
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// API user identity.
    #[arg(long, env = "THUMBER_UID")]
    pub uid: String,

    /// URL the thumbnail will be delivered to.
    #[arg(long)]
    pub callback: String,

    /// URL of the file to thumbnail.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub url: Option<String>,

    /// Local file to send inline instead of a URL.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// MIME type of the source file.
    #[arg(long)]
    pub mime_type: String,

    /// Target geometry, e.g. `150x150`.
    #[arg(long)]
    pub geometry: Option<String>,

    /// Page of a multi-page document.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub page: i32,

    /// Shared secret of the API user.
    #[arg(long, short = 's', env = "THUMBER_SECRET", hide_env_values = true)]
    pub secret: String,
}

/// Arguments for the `canonical` subcommand.
#[derive(Args, Debug)]
pub struct CanonicalArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        ThumberCli::command().debug_assert();
    }

    #[test]
    fn request_needs_url_or_file() {
        let missing = ThumberCli::try_parse_from([
            "thumber",
            "request",
            "--uid",
            "u1",
            "--callback",
            "http://cb",
            "--mime-type",
            "image/png",
            "--secret",
            "s3cr3t",
        ]);
        assert!(missing.is_err());

        let both = ThumberCli::try_parse_from([
            "thumber",
            "request",
            "--uid",
            "u1",
            "--callback",
            "http://cb",
            "--mime-type",
            "image/png",
            "--secret",
            "s3cr3t",
            "--url",
            "http://src/img.png",
            "--file",
            "img.png",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn kind_defaults_to_request() {
        let cli = ThumberCli::try_parse_from(["thumber", "canonical"]).unwrap();
        match cli.command {
            Commands::Canonical(args) => assert_eq!(args.document.kind, Kind::Request),
            other => panic!("expected canonical, got {:?}", other),
        }
    }

    #[test]
    fn log_format_is_global() {
        let cli =
            ThumberCli::try_parse_from(["thumber", "canonical", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
