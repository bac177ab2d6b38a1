//! Todo operations over an injected [`TodoStore`].

use std::sync::Arc;

use todo_core::error::CoreError;
use todo_core::types::DbId;
use todo_db::models::todo::{CreateTodo, Todo, UpdateTodo};
use todo_db::TodoStore;

use crate::error::AppResult;

const ENTITY: &str = "Todo";

/// Pass-through service translating the five todo operations into store calls.
///
/// Storage errors surface unchanged; the only translation is turning a
/// missing row into [`CoreError::NotFound`].
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Every live todo, in storage order.
    pub async fn list_all(&self) -> AppResult<Vec<Todo>> {
        let todos = self.store.find_all().await?;
        tracing::debug!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Todo> {
        let todo = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(todo)
    }

    /// Store `input` as given, client-supplied id included.
    pub async fn create(&self, input: CreateTodo) -> AppResult<Todo> {
        let todo = self.store.save(&input).await?;
        tracing::info!(todo_id = todo.id, "Todo created");
        Ok(todo)
    }

    /// Fetch-then-update. Empty strings in `patch` leave the stored value
    /// alone. Returns the record as it is after the update.
    pub async fn update(&self, id: DbId, patch: UpdateTodo) -> AppResult<Todo> {
        let current = self.get(id).await?;

        let patch = patch.non_zero();
        if patch.is_empty() {
            tracing::debug!(todo_id = id, "Update carried no non-zero fields");
            return Ok(current);
        }

        // The row can vanish between the fetch and the write.
        let updated = self
            .store
            .update_fields(id, &patch)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::info!(todo_id = id, "Todo updated");
        Ok(updated)
    }

    /// Soft-delete. Deleting a missing or already-deleted id is not an error.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let deleted = self.store.soft_delete(id).await?;
        tracing::info!(todo_id = id, deleted, "Todo delete requested");
        Ok(())
    }
}
