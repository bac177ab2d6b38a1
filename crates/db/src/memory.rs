//! In-process [`TodoStore`] used by tests that run without a database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::store::{StoreError, TodoStore};

#[derive(Debug, Default)]
struct Rows {
    by_id: BTreeMap<DbId, Todo>,
    last_id: DbId,
}

/// Todos held in a `BTreeMap` behind an async `RwLock`.
///
/// Mirrors the PostgreSQL behaviour: ids are assigned from a counter,
/// deletes only stamp `deleted_at`, and reads skip stamped rows.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    rows: RwLock<Rows>,
    offline: AtomicBool,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    /// (or succeed again when `false`).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of rows held, soft-deleted ones included.
    pub async fn stored_len(&self) -> usize {
        self.rows.read().await.by_id.len()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        self.ensure_online()?;
        let rows = self.rows.read().await;
        Ok(rows
            .by_id
            .values()
            .filter(|t| t.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Todo>, StoreError> {
        self.ensure_online()?;
        let rows = self.rows.read().await;
        Ok(rows
            .by_id
            .get(&id)
            .filter(|t| t.deleted_at.is_none())
            .cloned())
    }

    async fn save(&self, input: &CreateTodo) -> Result<Todo, StoreError> {
        self.ensure_online()?;
        let mut rows = self.rows.write().await;
        let now = chrono::Utc::now();

        let id = match input.explicit_id() {
            Some(id) => id,
            None => rows
                .last_id
                .checked_add(1)
                .ok_or(StoreError::IdsExhausted)?,
        };
        rows.last_id = rows.last_id.max(id);

        let created_at = rows.by_id.get(&id).map_or(now, |existing| existing.created_at);
        let todo = Todo {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            is_complete: input.is_complete,
            created_at,
            updated_at: now,
            deleted_at: None,
        };
        rows.by_id.insert(id, todo.clone());
        Ok(todo)
    }

    async fn update_fields(
        &self,
        id: DbId,
        patch: &UpdateTodo,
    ) -> Result<Option<Todo>, StoreError> {
        self.ensure_online()?;
        let mut rows = self.rows.write().await;
        let Some(todo) = rows.by_id.get_mut(&id).filter(|t| t.deleted_at.is_none()) else {
            return Ok(None);
        };
        patch.apply_to(todo);
        todo.updated_at = chrono::Utc::now();
        Ok(Some(todo.clone()))
    }

    async fn soft_delete(&self, id: DbId) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut rows = self.rows.write().await;
        match rows.by_id.get_mut(&id) {
            Some(todo) if todo.deleted_at.is_none() => {
                todo.deleted_at = Some(chrono::Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
