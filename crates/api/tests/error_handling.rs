//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly; no router or database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use keystone_api::error::AppError;
use keystone_auth::{SessionError, TokenError};
use keystone_core::error::CoreError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: impl Into<AppError>) -> (StatusCode, serde_json::Value) {
    let response = err.into().into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn invalid_input_returns_400() {
    let (status, json) = error_to_response(SessionError::InvalidInput {
        field: "login",
        reason: "must be at least 3 bytes".into(),
    })
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "invalid login: must be at least 3 bytes");
}

#[tokio::test]
async fn conflict_returns_409() {
    let (status, json) = error_to_response(SessionError::Conflict {
        login: "alice".into(),
    })
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "user already exists: alice");
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(SessionError::NotFound("user `bob`".into())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "user `bob` not found");
}

#[tokio::test]
async fn invalid_credential_returns_403() {
    let (status, json) = error_to_response(SessionError::InvalidCredential).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn malformed_header_returns_401() {
    let (status, json) = error_to_response(SessionError::MalformedHeader).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "MALFORMED_HEADER");
}

#[tokio::test]
async fn unknown_token_returns_403_without_the_reason() {
    let (status, json) =
        error_to_response(SessionError::UnknownToken(TokenError::InvalidSignature)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "UNKNOWN_TOKEN");
    assert_eq!(json["error"], "Unknown token");
}

#[tokio::test]
async fn revoked_token_returns_406() {
    let (status, json) = error_to_response(SessionError::TokenRevoked).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(json["code"], "TOKEN_REVOKED");
}

#[tokio::test]
async fn invalid_claims_returns_500() {
    let (status, json) = error_to_response(SessionError::InvalidClaims("sub".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INVALID_CLAIMS");
}

#[tokio::test]
async fn store_failure_returns_500_and_sanitizes_message() {
    let (status, json) = error_to_response(SessionError::StoreFailure(CoreError::Internal(
        "disk I/O error at /var/lib/secret.db".into(),
    )))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn missing_credentials_return_401() {
    let (status, json) =
        error_to_response(AppError::Unauthorized("Missing Authorization header".into())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}
