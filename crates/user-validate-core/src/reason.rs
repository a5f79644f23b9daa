//! Rule id → reason code conversion.
//!
//! `google.rpc.BadRequest.FieldViolation.reason` is expected to be an
//! `UPPER_SNAKE_CASE` identifier matching `[A-Z][A-Z0-9_]+[A-Z0-9]`.
//! Validation rule ids are dotted lowercase tokens (`string.min_len`),
//! so they are translated before being reported.

/// Convert a validation rule id into a reason code.
///
/// Replaces every `.` with `_` and uppercases the result. Nothing else is
/// touched: the output is **not** checked against the reason code pattern,
/// so a single-letter rule id such as `"x"` yields `"X"`, which
/// [`is_valid_reason_code`] rejects. Callers that need the guarantee should
/// check the output themselves.
///
/// Uppercasing uses the full Unicode mapping of [`str::to_uppercase`], so
/// the output can be longer than the input: `"ß"` becomes `"SS"`. ASCII rule
/// ids map one to one.
///
/// # Examples
///
/// ```
/// use user_validate_core::to_reason_code;
///
/// assert_eq!(to_reason_code("string.min_len"), "STRING_MIN_LEN");
/// assert_eq!(to_reason_code("password_mismatch"), "PASSWORD_MISMATCH");
/// assert_eq!(to_reason_code(""), "");
/// ```
#[must_use]
pub fn to_reason_code(rule_id: &str) -> String {
    rule_id.replace('.', "_").to_uppercase()
}

/// Check whether `s` has the shape of a reason code.
///
/// True iff `s` is at least two characters long, starts with `A-Z`, ends
/// with `A-Z` or `0-9`, and every character in between is `A-Z`, `0-9`
/// or `_`.
///
/// # Examples
///
/// ```
/// use user_validate_core::is_valid_reason_code;
///
/// assert!(is_valid_reason_code("STRING_MIN_LEN"));
/// assert!(!is_valid_reason_code("A"));
/// assert!(!is_valid_reason_code("1ABC"));
/// ```
#[must_use]
pub fn is_valid_reason_code(s: &str) -> bool {
    let bytes = s.as_bytes();
    let [first, middle @ .., last] = bytes else {
        return false;
    };

    first.is_ascii_uppercase()
        && (last.is_ascii_uppercase() || last.is_ascii_digit())
        && middle
            .iter()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == b'_')
}
