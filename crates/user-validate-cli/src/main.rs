//! CLI for exploring `user-validate` error reporting.
//!
//! # Subcommands
//!
//! ```text
//! # Rule id -> reason code table
//! user-validate-cli reason string.min_len password_mismatch
//!
//! # Decode base64 google.rpc.BadRequest payloads from Connect error bodies
//! user-validate-cli decode CikSFHBhc3N3b3JkcyBtdXN0IG1hdGNoGhFQQVNTV09SRF9NSVNNQVRDSA
//!
//! # Validate sample CreateUser requests and dump each violation
//! user-validate-cli inspect
//! ```
//!
//! Every subcommand falls back to built-in samples when given no input.

#![forbid(unsafe_code)]

mod render;

use anyhow::Context;
use clap::Parser;
use prost::Message;
use user_validate_core::codec;
use user_validate_core::proto::rpc::BadRequest;
use user_validate_core::proto::user::CreateUserRequest;
use user_validate_core::Validator;

const DEFAULT_RULE_IDS: &[&str] = &[
    "password_mismatch",
    "string.min_len",
    "string.max_len",
    "string.email",
    "custom.rule.nested",
    "user.name.not_empty",
    "",
];

const DEFAULT_PAYLOADS: &[(&str, &str)] = &[
    (
        "Single error (PASSWORD_MISMATCH)",
        "CikSFHBhc3N3b3JkcyBtdXN0IG1hdGNoGhFQQVNTV09SRF9NSVNNQVRDSA==",
    ),
    (
        "Multiple errors (name, email, password)",
        "CkIKBG5hbWUSKnZhbHVlIGxlbmd0aCBtdXN0IGJlIGF0IGxlYXN0IDEgY2hhcmFjdGVycxoOU1RSSU5HX01JTl9MRU4KOgoFZW1haWwSI3ZhbHVlIG11c3QgYmUgYSB2YWxpZCBlbWFpbCBhZGRyZXNzGgxTVFJJTkdfRU1BSUwKRgoIcGFzc3dvcmQSKnZhbHVlIGxlbmd0aCBtdXN0IGJlIGF0IGxlYXN0IDggY2hhcmFjdGVycxoOU1RSSU5HX01JTl9MRU4=",
    ),
];

/// Reason codes, `google.rpc.BadRequest` payloads and validation violations.
#[derive(Parser)]
#[command(name = "user-validate-cli", version, about)]
enum Cli {
    /// Convert rule identifiers to `UPPER_SNAKE_CASE` reason codes.
    Reason {
        /// Rule identifiers (e.g. `string.min_len`). Defaults to a sample set.
        rule_ids: Vec<String>,
    },

    /// Decode base64 `google.rpc.BadRequest` detail values.
    Decode {
        /// Base64 payloads, padded or not. Defaults to two sample payloads.
        payloads: Vec<String>,
    },

    /// Validate sample `CreateUserRequest`s and print every violation.
    Inspect,
}

fn main() -> anyhow::Result<()> {
    match Cli::parse() {
        Cli::Reason { rule_ids } => {
            reason(&rule_ids);
            Ok(())
        }
        Cli::Decode { payloads } => decode(&payloads),
        Cli::Inspect => {
            inspect();
            Ok(())
        }
    }
}

fn reason(rule_ids: &[String]) {
    println!("Rule ID to Reason Code Conversion");
    println!("==================================\n");

    if rule_ids.is_empty() {
        for rule_id in DEFAULT_RULE_IDS {
            println!("{}", render::reason_line(rule_id));
        }
    } else {
        for rule_id in rule_ids {
            println!("{}", render::reason_line(rule_id));
        }
    }

    println!("\n{}", render::CONVERSION_RULES);
}

fn decode(payloads: &[String]) -> anyhow::Result<()> {
    let samples: Vec<(String, &str)> = if payloads.is_empty() {
        DEFAULT_PAYLOADS
            .iter()
            .map(|&(name, value)| (name.to_string(), value))
            .collect()
    } else {
        payloads
            .iter()
            .enumerate()
            .map(|(i, value)| (format!("Payload {}", i + 1), value.as_str()))
            .collect()
    };

    for (name, value) in samples {
        println!("=== {name} ===\n");
        let bytes =
            codec::decode_value(value).with_context(|| format!("{name}: invalid base64"))?;
        println!("Decoded size: {} bytes", bytes.len());
        let bad = BadRequest::decode(bytes.as_slice())
            .with_context(|| format!("{name}: not a google.rpc.BadRequest"))?;
        println!("{}\n", render::bad_request_report(&bad)?);
    }
    Ok(())
}

fn inspect() {
    let samples = [
        (
            "Password mismatch",
            CreateUserRequest {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                password: "password123".to_string(),
                password_confirmation: "different".to_string(),
            },
        ),
        (
            "Multiple field errors",
            CreateUserRequest {
                name: String::new(),
                email: "not-an-email".to_string(),
                password: "short".to_string(),
                password_confirmation: "short".to_string(),
            },
        ),
    ];

    let validator = Validator::new();
    for (name, request) in &samples {
        println!("=== {name} ===\n");
        match validator.validate(request) {
            Ok(()) => println!("No validation errors"),
            Err(err) => println!("{}", render::validation_report(&err)),
        }
        println!();
    }
}
