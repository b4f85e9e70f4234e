//! Viewer asset endpoint.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::assets;
use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /assets/{name}.
pub(crate) async fn get_asset(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let asset =
        assets::get(&name, &state.highlight_css).ok_or(ServerError::AssetNotFound(name))?;
    Ok((
        [
            (header::CONTENT_TYPE, asset.content_type),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        asset.body.to_owned(),
    )
        .into_response())
}
