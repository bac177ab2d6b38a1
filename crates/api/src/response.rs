//! Shared JSON bodies written by handlers.
//!
//! Field names are capitalised (`Message`, `Error`) to match the rest of
//! the todo API.

use serde::Serialize;

/// `{ "Message": ... }` body for acknowledgements and the liveness probe.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: &'static str,
}

/// `{ "Message": ..., "Error": ... }` body for every failed request.
///
/// `message` says which operation failed, `error` carries the underlying
/// error text.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Error")]
    pub error: String,
}
