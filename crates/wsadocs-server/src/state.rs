//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use wsadocs_site::Site;

use crate::shell::{MenuLinks, ShellContext};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Manifest, routes and page rendering.
    pub(crate) site: Arc<Site>,
    /// Brand shown in the navbar.
    pub(crate) site_title: String,
    /// Stylesheet for highlighted code, generated from the configured theme.
    pub(crate) highlight_css: String,
    /// Application version for `ETag`s.
    pub(crate) version: String,
}

impl AppState {
    /// Normalized base path.
    pub(crate) fn base_path(&self) -> &str {
        &self.site.options().base_path
    }

    /// Context for rendering viewer pages.
    pub(crate) fn shell(&self) -> ShellContext<'_> {
        ShellContext {
            base_path: self.base_path(),
            site_title: &self.site_title,
            menu_links: MenuLinks::Session,
        }
    }
}
