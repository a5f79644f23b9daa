//! Core types for the user-validate service.
//!
//! This crate owns everything that does not need a transport:
//!
//! - [`proto`] - hand-written [`prost::Message`] types for `user.v1`,
//!   the `buf.validate` violation model and `google.rpc` error details
//! - [`to_reason_code`] / [`is_valid_reason_code`] - rule id → `UPPER_SNAKE_CASE`
//! - [`Validator`] - evaluates the declarative rules attached to a message
//!   via the [`Validate`] trait
//! - [`codec`] - base64 transport of `google.rpc.BadRequest` payloads
//!
//! The `user-validate` crate wires these into an RPC handler and turns
//! [`ValidationError`]s into `INVALID_ARGUMENT` statuses with field violations.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod codec;
mod error;
pub mod proto;
mod reason;
pub mod rules;
pub mod serde;
mod validator;

pub use error::{Error, Result};
pub use reason::{is_valid_reason_code, to_reason_code};
pub use rules::Validate;
pub use validator::{ValidationError, Validator, ValidatorConfig};
