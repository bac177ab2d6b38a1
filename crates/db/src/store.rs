//! Storage capability consumed by the service layer.
//!
//! [`TodoStore`] is the seam between the todo service and whatever holds
//! the rows. [`PgTodoStore`] backs it with PostgreSQL through
//! [`TodoRepo`]; [`crate::memory::MemoryTodoStore`] keeps everything in
//! process.

use async_trait::async_trait;
use todo_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::repositories::TodoRepo;
use crate::DbPool;

/// Failure raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("No todo ids left to assign")]
    IdsExhausted,
}

/// Persistence operations for todos.
///
/// Every read excludes soft-deleted rows.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All live todos, in storage order.
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// The live todo with `id`, if any.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Todo>, StoreError>;

    /// Persist a new todo (or overwrite one when `input` carries an explicit id).
    async fn save(&self, input: &CreateTodo) -> Result<Todo, StoreError>;

    /// Apply the present fields of `patch`. `None` when no live row matches.
    async fn update_fields(&self, id: DbId, patch: &UpdateTodo)
        -> Result<Option<Todo>, StoreError>;

    /// Mark a todo deleted. `false` when nothing was marked.
    async fn soft_delete(&self, id: DbId) -> Result<bool, StoreError>;
}

/// [`TodoStore`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgTodoStore {
    pool: DbPool,
}

impl PgTodoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(TodoRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Todo>, StoreError> {
        Ok(TodoRepo::find_by_id(&self.pool, id).await?)
    }

    async fn save(&self, input: &CreateTodo) -> Result<Todo, StoreError> {
        if let Some(id) = input.explicit_id() {
            tracing::debug!(todo_id = id, "Saving todo under client-supplied id");
        }
        Ok(TodoRepo::create(&self.pool, input).await?)
    }

    async fn update_fields(
        &self,
        id: DbId,
        patch: &UpdateTodo,
    ) -> Result<Option<Todo>, StoreError> {
        Ok(TodoRepo::update(&self.pool, id, patch).await?)
    }

    async fn soft_delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(TodoRepo::soft_delete(&self.pool, id).await?)
    }
}
