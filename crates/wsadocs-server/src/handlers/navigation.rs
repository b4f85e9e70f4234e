//! Navigation API endpoint.
//!
//! Returns the projected sidebar for a location and session state.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use wsadocs_site::{NavigationView, Session};

use crate::error::ServerError;
use crate::handlers::blocking;
use crate::state::AppState;

/// Query for GET /api/navigation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NavigationQuery {
    /// Location to resolve; the landing page when absent.
    location: Option<String>,
    /// Comma-separated expanded group ids.
    open: Option<String>,
    /// Location the request was made from.
    at: Option<String>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<NavigationView>, ServerError> {
    let view = blocking(&state, move |state| {
        let location = state
            .site
            .normalize(query.location.as_deref().unwrap_or_default());
        let snapshot = state.site.snapshot();
        let session = Session::restore(
            snapshot.forest(),
            &location,
            query.open.as_deref(),
            query.at.as_deref(),
        );
        state.site.navigation(&snapshot, &session)
    })
    .await?;
    Ok(Json(view))
}
