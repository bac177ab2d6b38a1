use crate::service::TodoService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the service holds its store behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Todo operations over the injected storage backend.
    pub todos: TodoService,
}
