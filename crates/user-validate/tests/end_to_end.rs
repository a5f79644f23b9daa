//! Drives the HTTP router end to end: JSON in, JSON (and protobuf details) out.

use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use user_validate::{
    router, UserServer, CONNECT_CREATE_USER_PATH, PLACEHOLDER_USER_ID, REST_CREATE_USER_PATH,
};
use user_validate_core::codec;
use user_validate_core::{Validator, ValidatorConfig};

/// Base64 `google.rpc.BadRequest` for an empty name, an invalid email and a
/// short password, as emitted by other implementations (padded).
const MULTIPLE: &str = "CkIKBG5hbWUSKnZhbHVlIGxlbmd0aCBtdXN0IGJlIGF0IGxlYXN0IDEgY2hhcmFjdGVycxoOU1RSSU5HX01JTl9MRU4KOgoFZW1haWwSI3ZhbHVlIG11c3QgYmUgYSB2YWxpZCBlbWFpbCBhZGRyZXNzGgxTVFJJTkdfRU1BSUwKRgoIcGFzc3dvcmQSKnZhbHVlIGxlbmd0aCBtdXN0IGJlIGF0IGxlYXN0IDggY2hhcmFjdGVycxoOU1RSSU5HX01JTl9MRU4=";

fn app() -> axum::Router {
    router(Arc::new(UserServer::default()))
}

async fn post(app: axum::Router, path: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::post(path)
        .header("content-type", "application/json")
        .header("x-request-id", "test-req")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn invalid_body() -> Value {
    json!({
        "name": "",
        "email": "invalid-email",
        "password": "short",
        "passwordConfirmation": "short",
    })
}

#[tokio::test]
async fn connect_create_user_succeeds() {
    let (status, body) = post(
        app(),
        CONNECT_CREATE_USER_PATH,
        &json!({
            "name": "John Doe",
            "email": "john@example.com",
            "password": "password123",
            "passwordConfirmation": "password123",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let user = &body["user"];
    assert_eq!(user["id"], PLACEHOLDER_USER_ID);
    assert_eq!(user["name"], "John Doe");
    assert_eq!(user["email"], "john@example.com");
    assert!(user["createdAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(user["createdAt"], user["updatedAt"]);
}

#[tokio::test]
async fn connect_error_carries_bad_request_bytes() {
    let (status, body) = post(app(), CONNECT_CREATE_USER_PATH, &invalid_body()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_argument");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("validation error:"));

    let detail = &body["details"][0];
    assert_eq!(detail["type"], "google.rpc.BadRequest");
    assert_eq!(detail["value"], MULTIPLE.trim_end_matches('='));

    let bad = codec::decode_bad_request(detail["value"].as_str().unwrap()).unwrap();
    assert_eq!(bad, codec::decode_bad_request(MULTIPLE).unwrap());
    assert_eq!(
        detail["debug"]["fieldViolations"][1],
        json!({
            "field": "email",
            "description": "value must be a valid email address",
            "reason": "STRING_EMAIL",
        })
    );
}

#[tokio::test]
async fn rest_error_uses_google_error_model() {
    let (status, body) = post(app(), REST_CREATE_USER_PATH, &invalid_body()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = &body["error"];
    assert_eq!(error["code"], 400);
    assert_eq!(error["status"], "INVALID_ARGUMENT");
    assert_eq!(
        error["details"],
        json!([{
            "@type": "type.googleapis.com/google.rpc.BadRequest",
            "fieldViolations": [
                {
                    "field": "name",
                    "description": "value length must be at least 1 characters",
                    "reason": "STRING_MIN_LEN",
                },
                {
                    "field": "email",
                    "description": "value must be a valid email address",
                    "reason": "STRING_EMAIL",
                },
                {
                    "field": "password",
                    "description": "value length must be at least 8 characters",
                    "reason": "STRING_MIN_LEN",
                },
            ],
        }])
    );
}

#[tokio::test]
async fn password_mismatch_reports_message_level_violation() {
    let (status, body) = post(
        app(),
        REST_CREATE_USER_PATH,
        &json!({
            "name": "John Doe",
            "email": "john@example.com",
            "password": "password123",
            "password_confirmation": "different",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["details"][0]["fieldViolations"],
        json!([{
            "field": "",
            "description": "passwords must match",
            "reason": "PASSWORD_MISMATCH",
        }])
    );
}

#[tokio::test]
async fn fail_fast_reports_only_first_violation() {
    let service = UserServer::new(Validator::with_config(ValidatorConfig { fail_fast: true }));
    let (status, body) = post(
        router(Arc::new(service)),
        CONNECT_CREATE_USER_PATH,
        &invalid_body(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let bad = codec::decode_bad_request(body["details"][0]["value"].as_str().unwrap()).unwrap();
    assert_eq!(bad.field_violations.len(), 1);
    assert_eq!(bad.field_violations[0].field, "name");
}

#[tokio::test]
async fn health_reports_version() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({ "status": "healthy", "version": env!("CARGO_PKG_VERSION") })
    );
}

async fn post_raw(path: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn connect_malformed_json_uses_connect_envelope() {
    let (status, body) = post_raw(CONNECT_CREATE_USER_PATH, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_argument");
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn rest_malformed_json_uses_google_error_model() {
    let (status, body) = post_raw(REST_CREATE_USER_PATH, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = &body["error"];
    assert_eq!(error["code"], 400);
    assert_eq!(error["status"], "INVALID_ARGUMENT");
    assert!(!error["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_field_type_is_invalid_argument() {
    let (status, body) = post_raw(REST_CREATE_USER_PATH, r#"{"name": 42}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
}
