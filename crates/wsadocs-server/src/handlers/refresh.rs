//! Manifest refresh endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::blocking;
use crate::state::AppState;

/// Response for POST /api/refresh.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshResponse {
    /// Number of routes after the reload.
    routes: usize,
    /// Why the manifest could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle POST /api/refresh.
pub(crate) async fn refresh(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, ServerError> {
    let snapshot = blocking(&state, |state| state.site.refresh()).await?;
    tracing::info!(routes = snapshot.routes().len(), "Manifest refreshed");
    Ok(Json(RefreshResponse {
        routes: snapshot.routes().len(),
        error: snapshot.load_error().map(str::to_owned),
    }))
}
