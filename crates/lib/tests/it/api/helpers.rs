use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use roster::api::{AppState, router};

use crate::helpers::{seed_directory, test_store};

/// Router over a freshly seeded store.
pub async fn seeded_router() -> Router {
    let store = test_store().await;
    seed_directory(&store).await;
    router(AppState::new(store))
}

/// Sends a request with an optional raw body and returns status and parsed JSON.
pub async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(raw) => Body::from(raw.to_string()),
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send_raw(router, "GET", uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send_raw(router, "POST", uri, Some(&body.to_string())).await
}
