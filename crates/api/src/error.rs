use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_core::error::CoreError;
use todo_db::StoreError;

use crate::response::ErrorResponse;

/// Application-level error type for the service and HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] to produce a consistent
/// `{"Message", "Error"}` JSON body with a status code chosen by kind.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `todo_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the storage backend.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Another error annotated with the operation that was being attempted.
    #[error("{message}: {source}")]
    Context {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Annotate this error with the operation that failed.
    ///
    /// Re-annotating replaces the message; the innermost error is kept.
    pub fn context(self, message: &'static str) -> Self {
        let source = match self {
            AppError::Context { source, .. } => source,
            other => Box::new(other),
        };
        AppError::Context { message, source }
    }

    /// The error beneath any context annotation.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Attach an operation message to any error convertible into [`AppError`].
pub trait ResultExt<T> {
    fn context(self, message: &'static str) -> AppResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, message: &'static str) -> AppResult<T> {
        self.map_err(|e| Into::<AppError>::into(e).context(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (message, root) = match &self {
            AppError::Context { message, source } => (*message, source.root()),
            other => (default_message(other), other),
        };

        let status = root.status_code();
        if status.is_server_error() {
            tracing::error!(error = %root, context = message, "Storage error");
        }

        let body = ErrorResponse {
            message: message.to_string(),
            error: root.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl AppError {
    /// HTTP status for this error kind.
    ///
    /// - Not found (domain or `RowNotFound`) maps to 404.
    /// - Validation failures map to 400.
    /// - Every other storage failure maps to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Core(CoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::Database(sqlx::Error::RowNotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Context { source, .. } => source.status_code(),
        }
    }
}

/// Message used when a handler did not annotate the error.
fn default_message(err: &AppError) -> &'static str {
    match err {
        AppError::Core(CoreError::NotFound { .. }) => "Resource not found",
        AppError::Core(CoreError::Validation(_)) => "Invalid request",
        AppError::Store(_) => "Storage error",
        AppError::Context { message, .. } => message,
    }
}
