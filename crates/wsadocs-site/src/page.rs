//! Rendered page views.

use serde::Serialize;
use wsadocs_renderer::TocEntry;

/// Which view a location produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// A manifest page rendered from markdown.
    Document,
    /// A manifest page whose document could not be fetched.
    Missing,
    /// No route matched; the static welcome view.
    Welcome,
}

/// Content area for one location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Normalized location the view was built for.
    pub location: String,
    /// Which view this is.
    pub kind: PageKind,
    /// False only for [`PageKind::Missing`].
    pub found: bool,
    /// Page title: first H1, else the manifest title.
    pub title: Option<String>,
    /// Rendered HTML.
    pub html: String,
    /// Table of contents (H2 and below).
    pub toc: Vec<TocEntry>,
    /// Render warnings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PageView {
    /// Browser tab title: `"<page> | <site>"`, or just the site title.
    #[must_use]
    pub fn document_title(&self, site_title: &str) -> String {
        match self.title.as_deref() {
            Some(title) if self.kind != PageKind::Welcome && title != site_title => {
                format!("{title} | {site_title}")
            }
            _ => site_title.to_owned(),
        }
    }
}
