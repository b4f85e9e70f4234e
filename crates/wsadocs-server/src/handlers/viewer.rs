//! Viewer pages.
//!
//! Serves the full HTML page for every location under the base path.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use wsadocs_site::Session;

use crate::error::ServerError;
use crate::handlers::{SessionQuery, blocking};
use crate::shell::render_shell;
use crate::state::AppState;

/// Handle GET {base} and GET {base}{*path}.
///
/// Responds 404 with the not-found placeholder when the page document could
/// not be fetched; unknown locations get the welcome view with 200.
pub(crate) async fn get_view(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<SessionQuery>,
) -> Result<Response, ServerError> {
    let (status, html) = blocking(&state, move |state| {
        let location = state.site.normalize(uri.path());
        let snapshot = state.site.snapshot();
        let session = Session::restore(
            snapshot.forest(),
            &location,
            query.open.as_deref(),
            query.at.as_deref(),
        );
        let nav = state.site.navigation(&snapshot, &session);
        let page = state.site.page(&location);

        let status = if page.found {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        };
        (status, render_shell(state.shell(), &nav, &page))
    })
    .await?;

    Ok((status, Html(html)).into_response())
}
