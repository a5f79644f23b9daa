//! `UserService.CreateUser` with structured validation errors.
//!
//! ---
//!
//! ## API Reference
//!
//! # Types
//!
//! - [`field_violations`] / [`validation_status`] - Turn validator violations
//!   into `google.rpc.BadRequest` field violations on an `INVALID_ARGUMENT` status
//! - [`UserService`] / [`UserServer`] - The RPC contract and its validating implementation
//! - [`router`] - Axum routes exposing the service over Connect-style JSON and REST
//! - [`RestError`] / [`ConnectError`] - Render a [`tonic::Status`] (with details) as JSON
//! - [`build_tonic_request`] - Bridges Axum requests to [`tonic::Request`]
//! - [`grpc_to_http_status`] / [`grpc_code_name`] - gRPC code tables
//!
//! # Flow
//!
//! ```text
//! JSON body ──► CreateUserRequest ──► Validator ──► ok ──► CreateUserResponse
//!                                         │
//!                                         └─ violations ──► BadRequest detail
//!                                                           on INVALID_ARGUMENT
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod adapter;
pub mod config;
mod error;
mod request;
mod routes;
mod service;
mod status_map;
pub mod telemetry;

pub use adapter::{
    bad_request_detail, field_violation, field_violations, join_field_path, validation_status,
};
pub use error::{ConnectError, DetailBody, RestError};
pub use request::{build_tonic_request, FORWARDED_HEADERS};
pub use routes::{router, CONNECT_CREATE_USER_PATH, REST_CREATE_USER_PATH};
pub use service::{UserServer, UserService, PLACEHOLDER_USER_ID};
pub use status_map::{connect_code_name, grpc_code_name, grpc_to_http_status};
