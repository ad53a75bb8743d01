//! HTTP-level integration tests for the `/api/v1/auth` endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{bearer, body_json, get, get_auth, post_auth, post_json, send};
use keystone_db::repositories::UserRepo;
use serde_json::json;

const REGISTER: &str = "/api/v1/auth/register";
const LOGIN: &str = "/api/v1/auth/login";
const LOGOUT: &str = "/api/v1/auth/logout";
const SESSION: &str = "/api/v1/auth/session";

/// Register a user through the API and return its access token.
async fn register(app: &axum::Router, login: &str, password: &str) -> String {
    let response = post_json(app, REGISTER, json!({ "login": login, "password": password })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_register_returns_bearer_token() {
    let (app, pool) = common::build_test_app().await;

    let response = post_json(&app, REGISTER, json!({ "login": "alice123", "password": "secretpw" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "User registered");
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert!(json["access_token"].is_string());

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_short_fields_returns_400() {
    let (app, pool) = common::build_test_app().await;

    let response = post_json(&app, REGISTER, json!({ "login": "al", "password": "secretpw" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(&app, REGISTER, json!({ "login": "alice", "password": "12345" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_duplicate_returns_409() {
    let (app, pool) = common::build_test_app().await;
    register(&app, "alice123", "secretpw").await;

    let response = post_json(&app, REGISTER, json!({ "login": "alice123", "password": "otherpw" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_with_missing_field_is_rejected() {
    let (app, _pool) = common::build_test_app().await;

    let response = post_json(&app, REGISTER, json!({ "login": "alice123" })).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_register_with_invalid_json_is_rejected() {
    let (app, _pool) = common::build_test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri(REGISTER)
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_success() {
    let (app, _pool) = common::build_test_app().await;
    register(&app, "alice123", "secretpw").await;

    let response = post_json(&app, LOGIN, json!({ "login": "alice123", "password": "secretpw" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "You are logged in alice123");
    assert_eq!(json["token_type"], "Bearer");
    assert!(json["access_token"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_returns_403() {
    let (app, _pool) = common::build_test_app().await;
    register(&app, "alice123", "secretpw").await;

    let response = post_json(&app, LOGIN, json!({ "login": "alice123", "password": "wrongpw" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_login_unknown_user_returns_404() {
    let (app, _pool) = common::build_test_app().await;

    let response = post_json(&app, LOGIN, json!({ "login": "ghost", "password": "secretpw" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Session / logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_session_reports_the_token_owner() {
    let (app, pool) = common::build_test_app().await;
    let token = register(&app, "alice123", "secretpw").await;

    let response = get_auth(&app, SESSION, &bearer(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let user = UserRepo::find_by_login(&pool, "alice123").await.unwrap().unwrap();
    let json = body_json(response).await;
    assert_eq!(json["login"], "alice123");
    assert_eq!(json["user_id"], user.id);
    assert_eq!(json["message"], "You are logged in alice123");
}

#[tokio::test]
async fn test_session_without_header_returns_401() {
    let (app, _pool) = common::build_test_app().await;

    let response = get(&app, SESSION).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_session_with_non_bearer_header_returns_401() {
    let (app, _pool) = common::build_test_app().await;
    let token = register(&app, "alice123", "secretpw").await;

    let response = get_auth(&app, SESSION, &format!("Basic {token}")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "MALFORMED_HEADER");
}

#[tokio::test]
async fn test_session_with_garbage_token_returns_403() {
    let (app, _pool) = common::build_test_app().await;

    let response = get_auth(&app, SESSION, "Bearer abc.def.ghi").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_TOKEN");
}

#[tokio::test]
async fn test_logout_then_session_returns_406() {
    let (app, _pool) = common::build_test_app().await;
    let token = register(&app, "alice123", "secretpw").await;

    let response = post_auth(&app, LOGOUT, &bearer(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Bye!");

    let response = get_auth(&app, SESSION, &bearer(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body_json(response).await["code"], "TOKEN_REVOKED");
}

#[tokio::test]
async fn test_logout_twice_succeeds() {
    let (app, _pool) = common::build_test_app().await;
    let token = register(&app, "alice123", "secretpw").await;

    assert_eq!(post_auth(&app, LOGOUT, &bearer(&token)).await.status(), StatusCode::OK);
    assert_eq!(post_auth(&app, LOGOUT, &bearer(&token)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_with_garbage_token_returns_403() {
    let (app, _pool) = common::build_test_app().await;

    let response = post_auth(&app, LOGOUT, "Bearer nope").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let (app, _pool) = common::build_test_app().await;

    let t1 = register(&app, "alice123", "secretpw").await;
    assert_eq!(get_auth(&app, SESSION, &bearer(&t1)).await.status(), StatusCode::OK);

    assert_eq!(post_auth(&app, LOGOUT, &bearer(&t1)).await.status(), StatusCode::OK);
    assert_eq!(
        get_auth(&app, SESSION, &bearer(&t1)).await.status(),
        StatusCode::NOT_ACCEPTABLE
    );

    let response = post_json(&app, LOGIN, json!({ "login": "alice123", "password": "secretpw" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let t2 = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    assert_ne!(t1, t2);
    assert_eq!(get_auth(&app, SESSION, &bearer(&t2)).await.status(), StatusCode::OK);
}
