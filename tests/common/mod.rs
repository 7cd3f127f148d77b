//! Helpers shared by the integration tests: app construction over throwaway
//! databases and a minimal request driver.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

/// Unique on-disk SQLite location for one test run.
pub fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "rosterd-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    path
}

/// Router over a fresh service handle, serving static assets from `static_root`.
pub async fn spawn_app_with_static(database_url: &str, static_root: &Path) -> Router {
    let db = rosterd::db::connect(database_url)
        .await
        .expect("failed to open database");
    let state = rosterd::router::RosterState::new(db);
    rosterd::router::roster_router(state, static_root)
}

/// Router over an in-memory database for tests that never touch `/`.
pub async fn spawn_app() -> Router {
    spawn_app_with_static("sqlite::memory:", &std::env::temp_dir()).await
}

/// Send a prebuilt request and return the status plus raw body bytes.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(request).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, bytes.to_vec())
}

/// Send `method uri` with an optional JSON body and parse the JSON reply.
pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let (status, bytes) = send(app, request).await;
    let value = serde_json::from_slice(&bytes).expect("response body was not json");
    (status, value)
}

/// The whole envelope contract: exactly these five keys, no more, no fewer.
pub fn assert_envelope_keys(value: &Value) {
    let obj = value.as_object().expect("envelope was not an object");
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["code", "message", "operation", "results", "success"]);
}
