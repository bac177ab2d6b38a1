//! Repository for the `todos` table.

use sqlx::PgPool;
use todo_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, is_complete, created_at, updated_at, deleted_at";

/// Provides CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a todo, returning the stored row.
    ///
    /// Without an explicit id the database assigns one. With an explicit id
    /// the row is upserted (reviving it if it was soft-deleted) and the id
    /// sequence is moved past it so later inserts do not collide.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        match input.explicit_id() {
            Some(id) => Self::upsert(pool, id, input).await,
            None => {
                let query = format!(
                    "INSERT INTO todos (name, description, is_complete)
                     VALUES ($1, $2, $3)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Todo>(&query)
                    .bind(&input.name)
                    .bind(&input.description)
                    .bind(input.is_complete)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    async fn upsert(pool: &PgPool, id: DbId, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO todos (id, name, description, is_complete)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                is_complete = EXCLUDED.is_complete,
                updated_at = NOW(),
                deleted_at = NULL
             RETURNING {COLUMNS}"
        );
        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_complete)
            .fetch_one(&mut *tx)
            .await?;

        // Never move the sequence backwards: ids taken by uncommitted inserts
        // are invisible to MAX(id) but already counted in last_value.
        sqlx::query(
            "SELECT setval(
                pg_get_serial_sequence('todos', 'id'),
                GREATEST($1, (SELECT MAX(id) FROM todos), (SELECT last_value FROM todos_id_seq))
             )",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(todo)
    }

    /// Find a todo by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all todos in id order. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, Todo>(&query).fetch_all(pool).await
    }

    /// Update a todo. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_complete = COALESCE($4, is_complete),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_complete)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a todo by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE todos SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
