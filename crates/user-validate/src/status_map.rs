//! gRPC code tables: canonical names and HTTP status mapping.
//!
//! One row per code keeps the REST mapping, the Google API name and the
//! Connect protocol name in sync:
//! - REST follows the [gRPC status code mapping](https://grpc.github.io/grpc/core/md_doc_statuscodes.html)
//! - Connect follows the [Connect protocol](https://connectrpc.com/docs/protocol#error-codes),
//!   which differs for `CANCELLED` (499) and `FAILED_PRECONDITION` (400)

use axum::http::StatusCode;
use tonic::Code;

struct CodeRow {
    code: Code,
    name: &'static str,
    connect_name: &'static str,
    http: StatusCode,
    connect_http: u16,
}

const fn row(
    code: Code,
    name: &'static str,
    connect_name: &'static str,
    http: StatusCode,
    connect_http: u16,
) -> CodeRow {
    CodeRow {
        code,
        name,
        connect_name,
        http,
        connect_http,
    }
}

#[rustfmt::skip]
static CODES: [CodeRow; 17] = [
    row(Code::Ok,                 "OK",                  "ok",                  StatusCode::OK,                    200),
    row(Code::Cancelled,          "CANCELLED",           "canceled",            StatusCode::REQUEST_TIMEOUT,       499),
    row(Code::Unknown,            "UNKNOWN",             "unknown",             StatusCode::INTERNAL_SERVER_ERROR, 500),
    row(Code::InvalidArgument,    "INVALID_ARGUMENT",    "invalid_argument",    StatusCode::BAD_REQUEST,           400),
    row(Code::DeadlineExceeded,   "DEADLINE_EXCEEDED",   "deadline_exceeded",   StatusCode::GATEWAY_TIMEOUT,       504),
    row(Code::NotFound,           "NOT_FOUND",           "not_found",           StatusCode::NOT_FOUND,             404),
    row(Code::AlreadyExists,      "ALREADY_EXISTS",      "already_exists",      StatusCode::CONFLICT,              409),
    row(Code::PermissionDenied,   "PERMISSION_DENIED",   "permission_denied",   StatusCode::FORBIDDEN,             403),
    row(Code::ResourceExhausted,  "RESOURCE_EXHAUSTED",  "resource_exhausted",  StatusCode::TOO_MANY_REQUESTS,     429),
    row(Code::FailedPrecondition, "FAILED_PRECONDITION", "failed_precondition", StatusCode::PRECONDITION_FAILED,   400),
    row(Code::Aborted,            "ABORTED",             "aborted",             StatusCode::CONFLICT,              409),
    row(Code::OutOfRange,         "OUT_OF_RANGE",        "out_of_range",        StatusCode::BAD_REQUEST,           400),
    row(Code::Unimplemented,      "UNIMPLEMENTED",       "unimplemented",       StatusCode::NOT_IMPLEMENTED,       501),
    row(Code::Internal,           "INTERNAL",            "internal",            StatusCode::INTERNAL_SERVER_ERROR, 500),
    row(Code::Unavailable,        "UNAVAILABLE",         "unavailable",         StatusCode::SERVICE_UNAVAILABLE,   503),
    row(Code::DataLoss,           "DATA_LOSS",           "data_loss",           StatusCode::INTERNAL_SERVER_ERROR, 500),
    row(Code::Unauthenticated,    "UNAUTHENTICATED",     "unauthenticated",     StatusCode::UNAUTHORIZED,          401),
];

fn lookup(code: Code) -> &'static CodeRow {
    // Code discriminants are the wire values 0..=16, matching the table order.
    let row = &CODES[code as usize];
    debug_assert_eq!(row.code, code);
    row
}

/// Canonical `SCREAMING_SNAKE_CASE` name of a gRPC code (Google API error model).
///
/// ```
/// use user_validate::grpc_code_name;
///
/// assert_eq!(grpc_code_name(tonic::Code::InvalidArgument), "INVALID_ARGUMENT");
/// ```
#[must_use]
pub fn grpc_code_name(code: Code) -> &'static str {
    lookup(code).name
}

/// Connect protocol name of a gRPC code (`snake_case`, `canceled` spelling).
///
/// ```
/// use user_validate::connect_code_name;
///
/// assert_eq!(connect_code_name(tonic::Code::InvalidArgument), "invalid_argument");
/// assert_eq!(connect_code_name(tonic::Code::Cancelled), "canceled");
/// ```
#[must_use]
pub fn connect_code_name(code: Code) -> &'static str {
    lookup(code).connect_name
}

/// HTTP status for a gRPC code on REST routes.
///
/// ```
/// use user_validate::grpc_to_http_status;
///
/// assert_eq!(
///     grpc_to_http_status(tonic::Code::InvalidArgument),
///     axum::http::StatusCode::BAD_REQUEST,
/// );
/// ```
#[must_use]
pub fn grpc_to_http_status(code: Code) -> StatusCode {
    lookup(code).http
}

/// HTTP status for a gRPC code on Connect routes.
pub(crate) fn connect_http_status(code: Code) -> StatusCode {
    StatusCode::from_u16(lookup(code).connect_http).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Code; 17] = [
        Code::Ok,
        Code::Cancelled,
        Code::Unknown,
        Code::InvalidArgument,
        Code::DeadlineExceeded,
        Code::NotFound,
        Code::AlreadyExists,
        Code::PermissionDenied,
        Code::ResourceExhausted,
        Code::FailedPrecondition,
        Code::Aborted,
        Code::OutOfRange,
        Code::Unimplemented,
        Code::Internal,
        Code::Unavailable,
        Code::DataLoss,
        Code::Unauthenticated,
    ];

    #[test]
    fn table_rows_line_up_with_codes() {
        for code in ALL {
            assert_eq!(lookup(code).code, code, "row for {code:?} is misplaced");
        }
    }

    #[test]
    fn connect_names_are_lowercase_google_names() {
        for code in ALL {
            let expected = match code {
                Code::Cancelled => "canceled".to_string(),
                _ => grpc_code_name(code).to_lowercase(),
            };
            assert_eq!(connect_code_name(code), expected);
        }
    }

    #[test]
    fn rest_and_connect_differ_only_where_documented() {
        for code in ALL {
            let rest = grpc_to_http_status(code);
            let connect = connect_http_status(code);
            match code {
                Code::Cancelled => assert_eq!(connect.as_u16(), 499),
                Code::FailedPrecondition => assert_eq!(connect, StatusCode::BAD_REQUEST),
                _ => assert_eq!(rest, connect, "{code:?}"),
            }
        }
    }

    #[test]
    fn validation_failures_are_bad_requests() {
        assert_eq!(
            grpc_to_http_status(Code::InvalidArgument),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            connect_http_status(Code::InvalidArgument),
            StatusCode::BAD_REQUEST
        );
    }
}
