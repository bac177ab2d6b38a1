//! Persistence for todo items.
//!
//! Exposes the PostgreSQL pool helpers used at startup, the `todos`
//! repository, and the [`store::TodoStore`] capability the service layer
//! depends on.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryTodoStore;
pub use store::{PgTodoStore, StoreError, TodoStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
