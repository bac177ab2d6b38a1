//! Route definitions for the `/todo` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes mounted at `/todo`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todo::list).post(todo::create))
        .route(
            "/{id}",
            get(todo::get_by_id).put(todo::update).delete(todo::delete),
        )
}
