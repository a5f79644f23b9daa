//! HTTP routes for [`UserService`].
//!
//! | Method | Path | Errors as |
//! |--------|------|-----------|
//! | `POST` | [`CONNECT_CREATE_USER_PATH`] | [`ConnectError`] |
//! | `POST` | [`REST_CREATE_USER_PATH`] | [`RestError`] |
//! | `GET`  | `/health` | - |
//!
//! Both create routes take a JSON `CreateUserRequest` and return a JSON
//! `CreateUserResponse`. Bodies that fail to parse are reported as
//! `INVALID_ARGUMENT` in the route's own error format.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::HeaderMap;
use serde_json::json;
use tonic::Status;
use user_validate_core::proto::user::{CreateUserRequest, CreateUserResponse};

use crate::error::{ConnectError, RestError};
use crate::request::build_tonic_request;
use crate::service::UserService;

/// Connect protocol path of `UserService.CreateUser`.
pub const CONNECT_CREATE_USER_PATH: &str = "/user.v1.UserService/CreateUser";

/// REST path of `UserService.CreateUser`.
pub const REST_CREATE_USER_PATH: &str = "/v1/users";

/// Build the router for a [`UserService`] implementation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use user_validate::{router, UserServer};
///
/// let app: axum::Router = router(Arc::new(UserServer::default()));
/// ```
pub fn router<S: UserService>(service: Arc<S>) -> Router {
    Router::new()
        .route(CONNECT_CREATE_USER_PATH, post(connect_create_user::<S>))
        .route(REST_CREATE_USER_PATH, post(rest_create_user::<S>))
        .route("/health", get(health))
        .with_state(service)
}

/// Unwrap a JSON body, turning extractor rejections into `INVALID_ARGUMENT`.
fn request_body(
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<CreateUserRequest, Status> {
    body.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        Status::invalid_argument(rejection.body_text())
    })
}

async fn connect_create_user<S: UserService>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, ConnectError> {
    let body = request_body(body)?;
    let response = service
        .create_user(build_tonic_request(body, &headers))
        .await?;
    Ok(Json(response.into_inner()))
}

async fn rest_create_user<S: UserService>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, RestError> {
    let body = request_body(body)?;
    let response = service
        .create_user(build_tonic_request(body, &headers))
        .await?;
    Ok(Json(response.into_inner()))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
