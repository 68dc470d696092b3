//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router via `build_app_router` so tests exercise the
//! same middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! the server runs, and provides small request helpers around
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use showyo_api::config::ServerConfig;
use showyo_api::router::build_app_router;
use showyo_api::state::AppState;
use showyo_api::storage::LocalMediaStore;
use showyo_core::hashing::sha256_hex;

/// Raw operator key presented by authed test requests.
pub const TEST_ADMIN_KEY: &str = "showyo-test-admin-key";

/// Build a test `ServerConfig` with safe defaults and a known operator key.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        admin_api_key_sha256: sha256_hex(TEST_ADMIN_KEY.as_bytes()),
        media_root: test_media_root(),
    }
}

/// A throwaway media root under the system temp directory. The store only
/// ever removes files and treats missing ones as success, so tests never
/// need to clean it up.
fn test_media_root() -> PathBuf {
    std::env::temp_dir().join("showyo-api-tests-media")
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let media = Arc::new(LocalMediaStore::new(config.media_root.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request failed")
}

fn json_request(method: &str, uri: &str, body: serde_json::Value, authed: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if authed {
        builder = builder.header(AUTHORIZATION, format!("Bearer {TEST_ADMIN_KEY}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn bare_request(method: &str, uri: &str, authed: bool) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if authed {
        builder = builder.header(AUTHORIZATION, format!("Bearer {TEST_ADMIN_KEY}"));
    }
    builder
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, bare_request("GET", uri, false)).await
}

pub async fn get_authed(app: Router, uri: &str) -> Response {
    send(app, bare_request("GET", uri, true)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, body, false)).await
}

pub async fn post_json_authed(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, body, true)).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, bare_request("POST", uri, false)).await
}

pub async fn post_authed(app: Router, uri: &str) -> Response {
    send(app, bare_request("POST", uri, true)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("PUT", uri, body, false)).await
}

pub async fn put_json_authed(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("PUT", uri, body, true)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("PATCH", uri, body, false)).await
}

pub async fn patch_json_authed(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("PATCH", uri, body, true)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, bare_request("DELETE", uri, false)).await
}

pub async fn delete_authed(app: Router, uri: &str) -> Response {
    send(app, bare_request("DELETE", uri, true)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body was not valid JSON")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Register a customer upload through the public endpoint and return its id.
pub async fn create_customer_item(pool: &PgPool, file_name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/content",
        serde_json::json!({
            "file_name": file_name,
            "content_type": "image/jpeg",
            "storage_path": format!("uploads/{file_name}"),
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Register an operator upload (payment and moderation bypassed, enqueued
/// immediately) and return its id.
pub async fn create_admin_item(pool: &PgPool, file_name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json_authed(
        app,
        "/api/v1/admin/content",
        serde_json::json!({
            "file_name": file_name,
            "content_type": "image/jpeg",
            "storage_path": format!("uploads/{file_name}"),
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Walk a customer item through payment confirmation and moderation approval
/// so it sits in the rotation as `queued`.
pub async fn approve_and_pay(pool: &PgPool, id: i64) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/content/{id}/payment"),
        serde_json::json!({"status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/content/{id}/moderation"),
        serde_json::json!({"decision": "approved"}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
