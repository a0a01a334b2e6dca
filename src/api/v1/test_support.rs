//! Shared helpers for the v1 endpoint tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use http_body_util::BodyExt;
use serde_json::Value;

use crate::api::{AppState, create_router};
use crate::backend::testing::ScriptedBackend;

/// Create a test app over a scripted backend
pub fn test_app(backend: &Arc<ScriptedBackend>, read_only: bool) -> Router {
    create_router(AppState::new(Arc::clone(backend), read_only))
}

/// Helper to parse JSON response body
pub async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    request("GET", uri)
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}
