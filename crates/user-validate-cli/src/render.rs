//! Plain-text rendering for the CLI subcommands.

use std::fmt::Write as _;

use user_validate_core::proto::rpc::BadRequest;
use user_validate_core::proto::validate::{
    FieldPath, Violation, TYPE_BOOL, TYPE_MESSAGE, TYPE_STRING, TYPE_UINT64,
};
use user_validate_core::{is_valid_reason_code, to_reason_code, ValidationError};

/// Rules applied by [`to_reason_code`] and checked by [`is_valid_reason_code`].
pub const CONVERSION_RULES: &str = "\
Conversion Rules:
  1. Replace '.' with '_'
  2. Convert to uppercase
  3. Must match pattern: [A-Z][A-Z0-9_]+[A-Z0-9]
  4. Maximum length: 63 characters";

/// One line of the `reason` table: quoted rule id, quoted reason, validity.
pub fn reason_line(rule_id: &str) -> String {
    let reason = to_reason_code(rule_id);
    format!(
        "{:<30} -> {:<30} (valid: {})",
        format!("{rule_id:?}"),
        format!("{reason:?}"),
        is_valid_reason_code(&reason)
    )
}

/// Pretty JSON followed by a per-violation listing.
///
/// # Errors
///
/// Fails only if `bad` cannot be serialized.
pub fn bad_request_report(bad: &BadRequest) -> serde_json::Result<String> {
    let mut out = String::from("Decoded message:\n");
    out.push_str(&serde_json::to_string_pretty(bad)?);
    out.push_str("\n\nField violations:");
    for (i, fv) in bad.field_violations.iter().enumerate() {
        let _ = write!(
            out,
            "\n  Violation {}:\n    Field: {:?}\n    Description: {:?}\n    Reason: {:?}",
            i + 1,
            fv.field,
            fv.description,
            fv.reason
        );
    }
    Ok(out)
}

/// Error text, violation count and every violation of a failed validation.
pub fn validation_report(err: &ValidationError) -> String {
    let mut out = format!(
        "Error: {err}\n\nNumber of violations: {}\n",
        err.violations().len()
    );
    for (i, v) in err.violations().iter().enumerate() {
        let _ = write!(out, "\nViolation {}:\n{}", i + 1, violation_details(v));
    }
    out
}

/// Indented `key: value` lines for the fields a violation carries.
pub fn violation_details(v: &Violation) -> String {
    let mut out = format!("  String: {}\n", violation_summary(v));
    if let Some(field) = &v.field {
        let _ = writeln!(out, "  Field: {}", field_path(field));
    }
    if let Some(rule) = &v.rule {
        let _ = writeln!(out, "  Rule: {}", field_path(rule));
    }
    if let Some(rule_id) = &v.rule_id {
        let _ = writeln!(out, "  RuleId: {rule_id}");
        let _ = writeln!(out, "  Reason: {}", to_reason_code(rule_id));
    }
    if let Some(message) = &v.message {
        let _ = writeln!(out, "  Message: {message}");
    }
    if let Some(for_key) = v.for_key {
        let _ = writeln!(out, "  ForKey: {for_key}");
    }
    out
}

/// `field: message`, or just the message for message-level rules.
fn violation_summary(v: &Violation) -> String {
    let message = v.message.as_deref().unwrap_or_default();
    match v.field.as_ref().map(FieldPath::dotted) {
        Some(field) if !field.is_empty() => format!("{field}: {message}"),
        _ => message.to_string(),
    }
}

/// `name(#1, string)` per element, joined with `.`.
pub fn field_path(path: &FieldPath) -> String {
    path.elements
        .iter()
        .map(|e| {
            let name = e.field_name.as_deref().unwrap_or("?");
            let number = e.field_number.map_or_else(|| "?".to_string(), |n| n.to_string());
            let ty = e.field_type.map_or("?", type_name);
            match e.index {
                Some(index) => format!("{name}[{index}](#{number}, {ty})"),
                None => format!("{name}(#{number}, {ty})"),
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn type_name(ty: i32) -> &'static str {
    match ty {
        TYPE_BOOL => "bool",
        TYPE_STRING => "string",
        TYPE_MESSAGE => "message",
        TYPE_UINT64 => "uint64",
        _ => "other",
    }
}
