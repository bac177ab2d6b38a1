pub mod health;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          liveness probe
///
/// /todo                                            list, create
/// /todo/{id}                                       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/todo", todo::router())
}
