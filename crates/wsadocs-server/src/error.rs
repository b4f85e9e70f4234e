//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No asset with the given name.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// A blocking site task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::AssetNotFound(name) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Asset not found", "path": name}),
            ),
            Self::Task(e) => {
                tracing::error!(error = %e, "Request task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
