//! Routes API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use wsadocs_nav::{RouteEntry, route_href};

use crate::error::ServerError;
use crate::handlers::blocking;
use crate::state::AppState;

/// Response for GET /api/routes.
#[derive(Debug, Serialize)]
pub(crate) struct RoutesResponse {
    /// Manifest routes in declaration order.
    routes: Vec<RouteInfo>,
    /// Heading of the view served for every other location.
    fallback: String,
    /// Manifest degradations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    /// Why the manifest could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// One route.
#[derive(Debug, Serialize)]
struct RouteInfo {
    /// Route path.
    path: String,
    /// Page identifier.
    page: String,
    /// Node title.
    title: String,
    /// Absolute href under the base path.
    href: String,
}

impl RouteInfo {
    fn new(entry: &RouteEntry, base_path: &str) -> Self {
        Self {
            path: entry.path.clone(),
            page: entry.page.clone(),
            title: entry.title.clone(),
            href: route_href(base_path, &entry.path),
        }
    }
}

/// Handle GET /api/routes.
pub(crate) async fn get_routes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoutesResponse>, ServerError> {
    let response = blocking(&state, |state| {
        let snapshot = state.site.snapshot();
        RoutesResponse {
            routes: snapshot
                .routes()
                .entries()
                .iter()
                .map(|entry| RouteInfo::new(entry, state.base_path()))
                .collect(),
            fallback: state.site.options().welcome.clone(),
            warnings: snapshot.warnings().to_vec(),
            error: snapshot.load_error().map(str::to_owned),
        }
    })
    .await?;
    Ok(Json(response))
}
