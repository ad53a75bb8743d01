#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use keystone_api::config::ServerConfig;
use keystone_api::router::build_app_router;
use keystone_api::state::AppState;
use keystone_auth::{AuthConfig, SigningSecret};
use keystone_db::DbPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "api-test-secret";

/// Build a test `ServerConfig` with safe defaults and the cheapest work factor.
pub fn test_config() -> ServerConfig {
    let mut auth = AuthConfig::new(SigningSecret::new(TEST_SECRET).unwrap());
    auth.work_factor = 1;

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        revocation_purge_interval_secs: 3600,
        auth,
    }
}

/// Build the full application router over a fresh, migrated in-memory
/// database. The pool is returned for direct assertions.
pub async fn build_test_app() -> (Router, DbPool) {
    let pool = keystone_db::create_memory_pool().await.unwrap();
    keystone_db::run_migrations(&pool).await.unwrap();

    let state = AppState::new(pool.clone(), test_config()).unwrap();
    (build_app_router(state), pool)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with a raw `Authorization` header value.
pub async fn get_auth(app: &Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST with no body and a raw `Authorization` header value.
pub async fn post_auth(app: &Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
