//! Validation error adapter - violations to `google.rpc.BadRequest`.
//!
//! Every source violation becomes exactly one field violation, in order:
//!
//! | `buf.validate.Violation` | `google.rpc.BadRequest.FieldViolation` |
//! |--------------------------|----------------------------------------|
//! | `field` path names       | `field`, dot-joined                    |
//! | `message`                | `description`, verbatim                |
//! | `rule_id`                | `reason`, via [`to_reason_code`]       |
//!
//! Absent values become empty strings.

use prost::Message;
use tonic::{Code, Status};
use user_validate_core::codec;
use user_validate_core::proto::rpc::{self, BadRequest, FieldViolation, BAD_REQUEST_TYPE_URL};
use user_validate_core::proto::validate::{FieldPath, Violation};
use user_validate_core::{to_reason_code, ValidationError};

/// Dot-join the named elements of a field path; `None` yields `""`.
#[must_use]
pub fn join_field_path(path: Option<&FieldPath>) -> String {
    path.map(FieldPath::dotted).unwrap_or_default()
}

/// Convert one validator violation into a `BadRequest` field violation.
#[must_use]
pub fn field_violation(violation: &Violation) -> FieldViolation {
    FieldViolation {
        field: join_field_path(violation.field.as_ref()),
        description: violation.message.clone().unwrap_or_default(),
        reason: to_reason_code(violation.rule_id.as_deref().unwrap_or_default()),
        localized_message: None,
    }
}

/// Convert violations in order, without filtering or merging.
#[must_use]
pub fn field_violations(violations: &[Violation]) -> Vec<FieldViolation> {
    violations.iter().map(field_violation).collect()
}

/// Build the `INVALID_ARGUMENT` status returned for a failed validation.
///
/// The status message is the validation error's display text. When the error
/// has at least one violation a `google.rpc.BadRequest` detail is attached
/// (as an encoded `google.rpc.Status` in the status details); with none the
/// status carries no details, and callers must read that as an unstructured
/// failure rather than success.
///
/// # Examples
///
/// ```
/// use user_validate::{bad_request_detail, validation_status};
/// use user_validate_core::proto::user::CreateUserRequest;
/// use user_validate_core::Validator;
///
/// let req = CreateUserRequest { name: String::new(), ..Default::default() };
/// let err = Validator::new().validate(&req).unwrap_err();
/// let status = validation_status(&err);
///
/// assert_eq!(status.code(), tonic::Code::InvalidArgument);
/// let bad = bad_request_detail(&status).unwrap();
/// assert_eq!(bad.field_violations[0].field, "name");
/// assert_eq!(bad.field_violations[0].reason, "STRING_MIN_LEN");
/// ```
#[must_use]
pub fn validation_status(err: &ValidationError) -> Status {
    let field_violations = field_violations(err.violations());
    tracing::debug!(
        violations = field_violations.len(),
        "request failed validation"
    );

    let message = err.to_string();
    if field_violations.is_empty() {
        return Status::invalid_argument(message);
    }

    let details = rpc::Status {
        code: Code::InvalidArgument as i32,
        message: message.clone(),
        details: vec![BadRequest { field_violations }.to_any()],
    };
    Status::with_details(
        Code::InvalidArgument,
        message,
        details.encode_to_vec().into(),
    )
}

/// The `google.rpc.BadRequest` detail carried by a status, if any.
///
/// Returns `None` when the status has no details, the details do not decode,
/// or none of them is a `BadRequest`.
#[must_use]
pub fn bad_request_detail(status: &Status) -> Option<BadRequest> {
    if status.details().is_empty() {
        return None;
    }
    codec::decode_status_details(status.details())
        .ok()?
        .details
        .iter()
        .find(|any| any.type_url == BAD_REQUEST_TYPE_URL)
        .and_then(|any| BadRequest::from_any(any).ok())
}
