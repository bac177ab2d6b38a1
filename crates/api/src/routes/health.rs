use axum::{routing::get, Json, Router};

use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/health -- liveness only; never touches the database.
async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "I am Alive",
    })
}

/// Mount the liveness probe (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
