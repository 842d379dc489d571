//! CLI module
//!
//! - `issue`: sign a token for an arbitrary subject
//! - `inspect`: verify a token and print its claims

pub mod inspect;
pub mod issue;

use clap::{Parser, Subcommand};
use serde_json::Value;

/// Issue and verify JWT bearer tokens
#[derive(Parser)]
#[command(name = "jwt-identity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign a token for a subject
    Issue(issue::IssueArgs),

    /// Verify a token and print its claim set
    Inspect(inspect::InspectArgs),
}

/// Read a command-line value as JSON, falling back to a plain string
pub(crate) fn parse_claim_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse a `name=value` claim argument
pub(crate) fn parse_claim(raw: &str) -> Result<(String, Value), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), parse_claim_value(value))),
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}
