//! HTTP-level integration tests for the `/api/todo` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener, over an in-memory store.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{body_json, content_type, delete, get, post_json, put_json, send_raw};
use serde_json::json;
use todo_db::MemoryTodoStore;

fn lecture() -> serde_json::Value {
    json!({
        "Name": "Big Data lecture 2 Assignment",
        "Description": "Page 21 of lecture 2",
        "IsComplete": false
    })
}

async fn create_lecture(store: &Arc<MemoryTodoStore>) -> i64 {
    let app = common::build_test_app(store.clone());
    let response = post_json(app, "/api/todo", lecture()).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["ID"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create + list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_todo_returns_200_with_assigned_id() {
    let store = Arc::new(MemoryTodoStore::new());
    let app = common::build_test_app(store.clone());

    let response = post_json(app, "/api/todo", lecture()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/json; charset=UTF-8");

    let json = body_json(response).await;
    assert!(json["ID"].is_number());
    assert_eq!(json["Name"], "Big Data lecture 2 Assignment");
    assert_eq!(json["Description"], "Page 21 of lecture 2");
    assert_eq!(json["IsComplete"], false);
    assert!(json["CreatedAt"].is_string());

    let app = common::build_test_app(store);
    let response = get(app, "/api/todo").await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(response).await;
    let items = list.as_array().expect("list should be a JSON array");
    assert!(items.iter().any(|t| t["ID"] == json["ID"]));
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = get(app, "/api/todo").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_create_accepts_body_without_content_type() {
    let store = Arc::new(MemoryTodoStore::new());
    let app = common::build_test_app(store);
    let response = send_raw(
        app,
        Method::POST,
        "/api/todo",
        r#"{"name": "Big Data lecture 2 Assignment", "Description": "Page 21 of lecture 2", "Is_complete": false}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["Name"], "Big Data lecture 2 Assignment");
    assert_eq!(json["IsComplete"], false);
}

#[tokio::test]
async fn test_create_with_client_id_keeps_it() {
    let store = Arc::new(MemoryTodoStore::new());
    let app = common::build_test_app(store);
    let response = post_json(app, "/api/todo", json!({"ID": 42, "Name": "Pinned"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ID"], 42);
}

#[tokio::test]
async fn test_create_with_negative_id_returns_400() {
    let store = Arc::new(MemoryTodoStore::new());
    let app = common::build_test_app(store.clone());
    let response = post_json(app, "/api/todo", json!({"ID": -5, "Name": "neg"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["Message"], "Failed to decode JSON Body");
    assert_eq!(store.stored_len().await, 0);
}

#[tokio::test]
async fn test_create_with_id_beyond_bigint_returns_400() {
    let store = Arc::new(MemoryTodoStore::new());
    let app = common::build_test_app(store.clone());
    let response = send_raw(
        app,
        Method::POST,
        "/api/todo",
        r#"{"ID": 9223372036854775808, "Name": "huge"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["Message"], "Invalid todo ID");
    assert_eq!(
        json["Error"],
        "Validation failed: id 9223372036854775808 is out of range"
    );
    assert_eq!(store.stored_len().await, 0);
}

#[tokio::test]
async fn test_create_with_zero_id_assigns_one() {
    let store = Arc::new(MemoryTodoStore::new());
    let app = common::build_test_app(store);
    let response = post_json(app, "/api/todo", json!({"ID": 0, "Name": "auto"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ID"], 1);
}

#[tokio::test]
async fn test_create_with_malformed_json_returns_400() {
    let store = Arc::new(MemoryTodoStore::new());
    let app = common::build_test_app(store.clone());
    let response = send_raw(app, Method::POST, "/api/todo", "{\"Name\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["Message"], "Failed to decode JSON Body");
    assert!(json["Error"].as_str().unwrap().contains("Validation failed"));
    assert_eq!(store.stored_len().await, 0);
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_todo_by_id() {
    let store = Arc::new(MemoryTodoStore::new());
    let id = create_lecture(&store).await;

    let app = common::build_test_app(store);
    let response = get(app, &format!("/api/todo/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ID"], id);
    assert_eq!(json["Name"], "Big Data lecture 2 Assignment");
    assert_eq!(json["Description"], "Page 21 of lecture 2");
    assert_eq!(json["IsComplete"], false);
}

#[tokio::test]
async fn test_get_nonexistent_todo_returns_404() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = get(app, "/api/todo/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&response), "application/json; charset=UTF-8");
    let json = body_json(response).await;
    assert_eq!(json["Message"], "Error Retrieving Todo by ID");
    assert_eq!(json["Error"], "Entity not found: Todo with id 999999");
}

#[tokio::test]
async fn test_get_with_non_numeric_id_returns_400() {
    let store = Arc::new(MemoryTodoStore::new());
    // An offline store proves the service is never reached.
    store.set_offline(true);
    let app = common::build_test_app(store);

    let response = get(app, "/api/todo/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["Message"], "Unable to parse UINT from ID");
}

#[tokio::test]
async fn test_get_with_negative_id_returns_400() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = get(app, "/api/todo/-3").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_description_only_keeps_other_fields() {
    let store = Arc::new(MemoryTodoStore::new());
    let id = create_lecture(&store).await;

    let app = common::build_test_app(store.clone());
    let response = put_json(
        app,
        &format!("/api/todo/{id}"),
        json!({"Description": "Page 22 of lecture 2"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["Description"], "Page 22 of lecture 2");
    assert_eq!(json["Name"], "Big Data lecture 2 Assignment");
    assert_eq!(json["IsComplete"], false);

    let app = common::build_test_app(store);
    let fetched = body_json(get(app, &format!("/api/todo/{id}")).await).await;
    assert_eq!(fetched["Description"], "Page 22 of lecture 2");
    assert_eq!(fetched["Name"], "Big Data lecture 2 Assignment");
}

#[tokio::test]
async fn test_update_sets_is_complete_true() {
    let store = Arc::new(MemoryTodoStore::new());
    let id = create_lecture(&store).await;

    let app = common::build_test_app(store);
    let response = put_json(app, &format!("/api/todo/{id}"), json!({"IsComplete": true})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["IsComplete"], true);
}

#[tokio::test]
async fn test_update_with_empty_name_keeps_stored_name() {
    let store = Arc::new(MemoryTodoStore::new());
    let id = create_lecture(&store).await;

    let app = common::build_test_app(store);
    let response = put_json(app, &format!("/api/todo/{id}"), json!({"Name": ""})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["Name"],
        "Big Data lecture 2 Assignment"
    );
}

#[tokio::test]
async fn test_update_nonexistent_todo_returns_404() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = put_json(app, "/api/todo/31337", json!({"Name": "Ghost"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["Message"], "Failed to update todo");
}

#[tokio::test]
async fn test_update_with_bad_id_returns_400() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = put_json(app, "/api/todo/one", json!({"Name": "x"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["Message"],
        "Failed to parse uint from ID"
    );
}

#[tokio::test]
async fn test_update_decodes_body_before_parsing_id() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = send_raw(app, Method::PUT, "/api/todo/one", "not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["Message"],
        "Failed to decode JSON Body"
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_twice_succeeds_and_hides_todo() {
    let store = Arc::new(MemoryTodoStore::new());
    let id = create_lecture(&store).await;

    for _ in 0..2 {
        let app = common::build_test_app(store.clone());
        let response = delete(app, &format!("/api/todo/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"Message": "Successfully Deleted"})
        );
    }

    let app = common::build_test_app(store.clone());
    let list = body_json(get(app, "/api/todo").await).await;
    assert_eq!(list, json!([]));

    let app = common::build_test_app(store.clone());
    let response = get(app, &format!("/api/todo/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Soft delete: the row is still held by the store.
    assert_eq!(store.stored_len().await, 1);
}

#[tokio::test]
async fn test_delete_unknown_id_returns_200() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = delete(app, "/api/todo/123").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_with_bad_id_returns_400() {
    let app = common::build_test_app(Arc::new(MemoryTodoStore::new()));
    let response = delete(app, "/api/todo/1e3").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Storage failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_storage_failure_returns_500_with_envelope() {
    let store = Arc::new(MemoryTodoStore::new());
    store.set_offline(true);
    let app = common::build_test_app(store);

    let response = get(app, "/api/todo").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["Message"], "Failed to retrieve all todos");
    assert_eq!(json["Error"], "Storage unavailable: memory store is offline");
}
