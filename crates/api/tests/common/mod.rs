#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_api::config::ServerConfig;
use todo_api::router::build_app_router;
use todo_api::service::TodoService;
use todo_api::state::AppState;
use todo_db::{MemoryTodoStore, TodoStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
    }
}

/// Build the full application router over the given in-memory store.
///
/// Uses the same `build_app_router` as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(store: Arc<MemoryTodoStore>) -> Router {
    build_test_app_with_store(store)
}

/// Build the application router over any [`TodoStore`] implementation.
pub fn build_test_app_with_store(store: Arc<dyn TodoStore>) -> Router {
    let state = AppState {
        todos: TodoService::new(store),
    };
    build_app_router(state, &test_config())
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, json).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, json).await
}

async fn send_json(app: Router, method: Method, uri: &str, json: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a raw body with no content type, the way loosely written clients do.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &'static str) -> Response {
    send(app, method, uri, Body::from(body)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get("content-type")
        .expect("response should carry a content type")
        .to_str()
        .unwrap()
}
