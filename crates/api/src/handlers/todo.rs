//! Handlers for the `/api/todo` resource.
//!
//! Path ids arrive as raw strings and request bodies as raw bytes so that
//! malformed input is reported through [`crate::error::AppError`] with the same JSON
//! envelope as every other failure, and never reaches the service.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::de::DeserializeOwned;
use todo_core::error::CoreError;
use todo_core::types::parse_db_id;
use todo_db::models::todo::{CreateTodo, Todo, UpdateTodo};

use crate::error::{AppResult, ResultExt};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/todo
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Todo>>> {
    let todos = state
        .todos
        .list_all()
        .await
        .context("Failed to retrieve all todos")?;
    Ok(Json(todos))
}

/// POST /api/todo
pub async fn create(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Todo>> {
    let input: CreateTodo = decode_body(&body).context("Failed to decode JSON Body")?;
    input.validate().context("Invalid todo ID")?;
    let todo = state
        .todos
        .create(input)
        .await
        .context("Failed to post new todo")?;
    Ok(Json(todo))
}

/// GET /api/todo/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Todo>> {
    let id = parse_db_id(&raw_id).context("Unable to parse UINT from ID")?;
    let todo = state
        .todos
        .get(id)
        .await
        .context("Error Retrieving Todo by ID")?;
    Ok(Json(todo))
}

/// PUT /api/todo/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Todo>> {
    let patch: UpdateTodo = decode_body(&body).context("Failed to decode JSON Body")?;
    let id = parse_db_id(&raw_id).context("Failed to parse uint from ID")?;
    let todo = state
        .todos
        .update(id, patch)
        .await
        .context("Failed to update todo")?;
    Ok(Json(todo))
}

/// DELETE /api/todo/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_db_id(&raw_id).context("Failed to parse uint from ID")?;
    state
        .todos
        .delete(id)
        .await
        .context("Failed to delete todo by ID")?;
    Ok(Json(MessageResponse {
        message: "Successfully Deleted",
    }))
}

/// Decode a JSON request body regardless of the request `Content-Type`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, CoreError> {
    serde_json::from_slice(body).map_err(|e| CoreError::Validation(e.to_string()))
}
