//! JSON error bodies for a [`tonic::Status`], including its error details.
//!
//! Two wrappers render the same status for different HTTP surfaces:
//!
//! - [`RestError`] - [Google API error model](https://cloud.google.com/apis/design/errors),
//!   details inlined as JSON with an `@type` field
//! - [`ConnectError`] - [Connect protocol](https://connectrpc.com/docs/protocol#error-end-stream)
//!   error body, details as base64 protobuf with a JSON `debug` rendering

use axum::extract::Json;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::{json, Value};
use user_validate_core::codec;
use user_validate_core::proto::rpc::{BadRequest, BAD_REQUEST_TYPE_URL};

use crate::status_map::{
    connect_code_name, connect_http_status, grpc_code_name, grpc_to_http_status,
};

const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Unpack the `google.protobuf.Any` details carried by a status.
///
/// Undecodable details are logged and dropped; the status itself still
/// renders.
fn status_details(status: &tonic::Status) -> Vec<prost_types::Any> {
    if status.details().is_empty() {
        return Vec::new();
    }
    match codec::decode_status_details(status.details()) {
        Ok(rpc_status) => rpc_status.details,
        Err(err) => {
            tracing::warn!(error = %err, "dropping undecodable status details");
            Vec::new()
        }
    }
}

/// JSON rendering of a known detail type, if any.
fn detail_json(any: &prost_types::Any) -> Option<Value> {
    if any.type_url != BAD_REQUEST_TYPE_URL {
        return None;
    }
    BadRequest::from_any(any)
        .ok()
        .and_then(|bad| serde_json::to_value(bad).ok())
}

/// One entry of a Connect error body's `details` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailBody {
    /// Fully-qualified message name, without the type URL prefix.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Base64 (standard alphabet, unpadded) protobuf encoding.
    pub value: String,
    /// JSON rendering for humans; absent for unknown types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}

impl DetailBody {
    fn from_any(any: &prost_types::Any) -> Self {
        Self {
            type_name: any
                .type_url
                .strip_prefix(TYPE_URL_PREFIX)
                .unwrap_or(&any.type_url)
                .to_string(),
            value: codec::encode_value(&any.value),
            debug: detail_json(any),
        }
    }
}

/// REST error wrapper - converts [`tonic::Status`] to an HTTP error response.
///
/// ```json
/// {
///   "error": {
///     "code": 400,
///     "message": "validation error: ...",
///     "status": "INVALID_ARGUMENT",
///     "details": [{
///       "@type": "type.googleapis.com/google.rpc.BadRequest",
///       "fieldViolations": [{ "field": "name", "description": "...", "reason": "STRING_MIN_LEN" }]
///     }]
///   }
/// }
/// ```
///
/// `details` is omitted when the status carries none.
///
/// # Examples
///
/// ```
/// use user_validate::RestError;
/// use axum::response::IntoResponse;
///
/// let response = RestError::new(tonic::Status::not_found("user not found")).into_response();
/// assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone)]
pub struct RestError(tonic::Status);

impl RestError {
    /// Wrap a [`tonic::Status`].
    #[must_use]
    pub const fn new(status: tonic::Status) -> Self {
        Self(status)
    }

    /// The underlying status.
    #[must_use]
    pub const fn status(&self) -> &tonic::Status {
        &self.0
    }

    /// Unwrap into the underlying status.
    #[must_use]
    pub fn into_status(self) -> tonic::Status {
        self.0
    }

    /// The JSON body this error renders to.
    #[must_use]
    pub fn body(&self) -> Value {
        let mut error = json!({
            "code": grpc_to_http_status(self.0.code()).as_u16(),
            "message": self.0.message(),
            "status": grpc_code_name(self.0.code()),
        });

        let details: Vec<Value> = status_details(&self.0)
            .iter()
            .map(|any| {
                let mut detail = match detail_json(any) {
                    Some(Value::Object(map)) => map,
                    _ => {
                        let mut map = serde_json::Map::new();
                        map.insert("value".into(), codec::encode_value(&any.value).into());
                        map
                    }
                };
                detail.insert("@type".into(), any.type_url.clone().into());
                Value::Object(detail)
            })
            .collect();
        if !details.is_empty() {
            error["details"] = Value::Array(details);
        }

        json!({ "error": error })
    }
}

impl std::fmt::Display for RestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", grpc_code_name(self.0.code()), self.0.message())
    }
}

impl std::error::Error for RestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<tonic::Status> for RestError {
    fn from(status: tonic::Status) -> Self {
        Self(status)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let http_status = grpc_to_http_status(self.0.code());
        (http_status, Json(self.body())).into_response()
    }
}

/// Connect protocol error wrapper.
///
/// ```json
/// {
///   "code": "invalid_argument",
///   "message": "validation error: ...",
///   "details": [{ "type": "google.rpc.BadRequest", "value": "CkIKBG5hbWUS...", "debug": { ... } }]
/// }
/// ```
///
/// `value` decodes to the protobuf-encoded detail message, so clients can
/// recover the exact `google.rpc.BadRequest` the server attached.
#[derive(Debug, Clone)]
pub struct ConnectError(tonic::Status);

impl ConnectError {
    /// Wrap a [`tonic::Status`].
    #[must_use]
    pub const fn new(status: tonic::Status) -> Self {
        Self(status)
    }

    /// The underlying status.
    #[must_use]
    pub const fn status(&self) -> &tonic::Status {
        &self.0
    }

    /// The `details` entries this error renders.
    #[must_use]
    pub fn details(&self) -> Vec<DetailBody> {
        status_details(&self.0)
            .iter()
            .map(DetailBody::from_any)
            .collect()
    }

    /// The JSON body this error renders to.
    #[must_use]
    pub fn body(&self) -> Value {
        let mut body = json!({ "code": connect_code_name(self.0.code()) });
        if !self.0.message().is_empty() {
            body["message"] = self.0.message().into();
        }
        let details = self.details();
        if !details.is_empty() {
            body["details"] = json!(details);
        }
        body
    }
}

impl std::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", connect_code_name(self.0.code()), self.0.message())
    }
}

impl std::error::Error for ConnectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<tonic::Status> for ConnectError {
    fn from(status: tonic::Status) -> Self {
        Self(status)
    }
}

impl IntoResponse for ConnectError {
    fn into_response(self) -> axum::response::Response {
        let http_status = connect_http_status(self.0.code());
        (http_status, Json(self.body())).into_response()
    }
}
