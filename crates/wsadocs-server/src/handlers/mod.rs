//! HTTP request handlers.

pub(crate) mod assets;
pub(crate) mod navigation;
pub(crate) mod pages;
pub(crate) mod refresh;
pub(crate) mod routes;
pub(crate) mod viewer;

use std::sync::Arc;

use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Sidebar state carried by viewer links.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SessionQuery {
    /// Comma-separated expanded group ids.
    pub(crate) open: Option<String>,
    /// Location the link was generated from.
    pub(crate) at: Option<String>,
}

/// Run site work on the blocking pool.
///
/// Source reads use blocking I/O (`std::fs`, `ureq`), so handlers never call
/// into [`wsadocs_site::Site`] on the async runtime directly.
pub(crate) async fn blocking<T, F>(state: &Arc<AppState>, work: F) -> Result<T, ServerError>
where
    F: FnOnce(&AppState) -> T + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    Ok(tokio::task::spawn_blocking(move || work(&state)).await?)
}
