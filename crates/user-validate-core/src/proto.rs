//! Hand-written protobuf message types.
//!
//! Only the messages this service touches are modelled, with tags matching
//! the upstream `.proto` definitions so the wire format is interchangeable:
//!
//! - [`user`] - `user.v1.CreateUserRequest`, `CreateUserResponse`, `User`
//! - [`validate`] - the `buf.validate.Violation` model produced by the validator
//! - [`rpc`] - `google.rpc.Status` and `google.rpc.BadRequest` error details

/// `user.v1` request and response messages.
///
/// JSON field names follow the protobuf JSON mapping (lowerCamelCase), and
/// the original snake_case names are accepted on input.
pub mod user {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    /// Fully-qualified service name.
    pub const SERVICE_NAME: &str = "user.v1.UserService";

    /// Request payload for `UserService.CreateUser`.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct CreateUserRequest {
        /// Display name, 1 to 255 characters.
        #[prost(string, tag = "1")]
        pub name: String,
        /// Email address, at most 255 characters.
        #[prost(string, tag = "2")]
        pub email: String,
        /// Password, 8 to 72 characters.
        #[prost(string, tag = "3")]
        pub password: String,
        /// Must equal `password`.
        #[prost(string, tag = "4")]
        #[serde(alias = "password_confirmation")]
        pub password_confirmation: String,
    }

    /// Response payload for `UserService.CreateUser`.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct CreateUserResponse {
        /// The created user.
        #[prost(message, optional, tag = "1")]
        pub user: Option<User>,
    }

    /// A user record.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct User {
        /// Opaque identifier.
        #[prost(string, tag = "1")]
        pub id: String,
        /// Display name.
        #[prost(string, tag = "2")]
        pub name: String,
        /// Email address.
        #[prost(string, tag = "3")]
        pub email: String,
        /// Creation time.
        #[prost(message, optional, tag = "4")]
        #[serde(with = "crate::serde::opt_timestamp", alias = "created_at")]
        pub created_at: Option<prost_types::Timestamp>,
        /// Last update time.
        #[prost(message, optional, tag = "5")]
        #[serde(with = "crate::serde::opt_timestamp", alias = "updated_at")]
        pub updated_at: Option<prost_types::Timestamp>,
    }
}

/// `buf.validate` violation model.
///
/// Every field is optional on the wire; consumers must treat absent values as
/// empty rather than failing.
pub mod validate {
    use prost::Message;

    /// `google.protobuf.FieldDescriptorProto.Type.TYPE_BOOL`.
    pub const TYPE_BOOL: i32 = 8;
    /// `google.protobuf.FieldDescriptorProto.Type.TYPE_STRING`.
    pub const TYPE_STRING: i32 = 9;
    /// `google.protobuf.FieldDescriptorProto.Type.TYPE_MESSAGE`.
    pub const TYPE_MESSAGE: i32 = 11;
    /// `google.protobuf.FieldDescriptorProto.Type.TYPE_UINT64`.
    pub const TYPE_UINT64: i32 = 4;

    /// A collection of violations, as carried by a validation failure.
    #[derive(Clone, PartialEq, Message)]
    pub struct Violations {
        /// Violations in evaluation order.
        #[prost(message, repeated, tag = "1")]
        pub violations: Vec<Violation>,
    }

    /// A single failed rule.
    #[derive(Clone, PartialEq, Message)]
    pub struct Violation {
        /// Path to the offending field. Absent for message-level rules.
        #[prost(message, optional, tag = "5")]
        pub field: Option<FieldPath>,
        /// Path to the rule inside the rule set (e.g. `string.min_len`).
        #[prost(message, optional, tag = "6")]
        pub rule: Option<FieldPath>,
        /// Machine-readable rule identifier (e.g. `string.min_len`).
        #[prost(string, optional, tag = "2")]
        pub rule_id: Option<String>,
        /// Human-readable failure message.
        #[prost(string, optional, tag = "3")]
        pub message: Option<String>,
        /// Whether the violation applies to a map key rather than its value.
        #[prost(bool, optional, tag = "4")]
        pub for_key: Option<bool>,
    }

    /// Sequence of path elements from the root message to a field.
    #[derive(Clone, PartialEq, Eq, Message)]
    pub struct FieldPath {
        /// Path elements, outermost first.
        #[prost(message, repeated, tag = "1")]
        pub elements: Vec<FieldPathElement>,
    }

    /// One step of a [`FieldPath`].
    #[derive(Clone, PartialEq, Eq, Message)]
    pub struct FieldPathElement {
        /// Field number in the containing message.
        #[prost(int32, optional, tag = "1")]
        pub field_number: Option<i32>,
        /// Field name in the containing message.
        #[prost(string, optional, tag = "2")]
        pub field_name: Option<String>,
        /// Field type (`FieldDescriptorProto.Type`).
        #[prost(int32, optional, tag = "3")]
        pub field_type: Option<i32>,
        /// Index into a repeated field.
        #[prost(uint64, optional, tag = "6")]
        pub index: Option<u64>,
    }

    impl FieldPath {
        /// Build a path from `(number, name, type)` triples.
        #[must_use]
        pub fn from_parts(parts: &[(i32, &str, i32)]) -> Self {
            Self {
                elements: parts
                    .iter()
                    .map(|&(number, name, ty)| FieldPathElement::new(number, name, ty))
                    .collect(),
            }
        }

        /// Dot-joined names of the elements that carry one (e.g. `"string.min_len"`).
        ///
        /// Elements without a name are skipped, so an empty or nameless path
        /// renders as `""`.
        #[must_use]
        pub fn dotted(&self) -> String {
            self.elements
                .iter()
                .filter_map(|e| e.field_name.as_deref())
                .collect::<Vec<_>>()
                .join(".")
        }
    }

    impl FieldPathElement {
        /// Element addressing a named field.
        #[must_use]
        pub fn new(number: i32, name: &str, field_type: i32) -> Self {
            Self {
                field_number: Some(number),
                field_name: Some(name.to_string()),
                field_type: Some(field_type),
                index: None,
            }
        }
    }
}

/// `google.rpc` error model.
pub mod rpc {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    /// Type URL of a packed [`BadRequest`].
    pub const BAD_REQUEST_TYPE_URL: &str = "type.googleapis.com/google.rpc.BadRequest";

    /// `google.rpc.Status`, the payload behind `grpc-status-details-bin`.
    #[derive(Clone, PartialEq, Message)]
    pub struct Status {
        /// `google.rpc.Code` value.
        #[prost(int32, tag = "1")]
        pub code: i32,
        /// Developer-facing message.
        #[prost(string, tag = "2")]
        pub message: String,
        /// Packed detail messages.
        #[prost(message, repeated, tag = "3")]
        pub details: Vec<prost_types::Any>,
    }

    /// `google.rpc.BadRequest`: violations in a client request.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct BadRequest {
        /// All violations in the request.
        #[prost(message, repeated, tag = "1")]
        pub field_violations: Vec<FieldViolation>,
    }

    /// `google.rpc.BadRequest.FieldViolation`.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct FieldViolation {
        /// Path to the offending field (e.g. `"name"`).
        #[prost(string, tag = "1")]
        pub field: String,
        /// Why the request element is bad.
        #[prost(string, tag = "2")]
        pub description: String,
        /// `UPPER_SNAKE_CASE` reason code.
        #[prost(string, tag = "3")]
        pub reason: String,
        /// Localized version of `description`.
        #[prost(message, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub localized_message: Option<LocalizedMessage>,
    }

    /// `google.rpc.LocalizedMessage`.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct LocalizedMessage {
        /// BCP-47 locale (e.g. `"en-US"`).
        #[prost(string, tag = "1")]
        pub locale: String,
        /// Message in that locale.
        #[prost(string, tag = "2")]
        pub message: String,
    }

    impl BadRequest {
        /// Pack into a `google.protobuf.Any`.
        #[must_use]
        pub fn to_any(&self) -> prost_types::Any {
            prost_types::Any {
                type_url: BAD_REQUEST_TYPE_URL.to_string(),
                value: self.encode_to_vec(),
            }
        }

        /// Unpack from a `google.protobuf.Any`.
        ///
        /// # Errors
        ///
        /// Returns [`crate::Error::UnexpectedDetailType`] if the `Any` holds
        /// another message, or [`crate::Error::Decode`] if the bytes are malformed.
        pub fn from_any(any: &prost_types::Any) -> crate::Result<Self> {
            if any.type_url != BAD_REQUEST_TYPE_URL {
                return Err(crate::Error::UnexpectedDetailType {
                    expected: BAD_REQUEST_TYPE_URL,
                    actual: any.type_url.clone(),
                });
            }
            Ok(Self::decode(any.value.as_slice())?)
        }
    }
}
