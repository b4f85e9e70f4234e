//! Manifest loading and page rendering.
//!
//! [`Site`] loads the navigation manifest from a [`DocSource`] once and keeps
//! the parsed forest and route table as an immutable [`SiteSnapshot`].
//!
//! # Thread Safety
//!
//! `Site` is designed for concurrent access:
//! - `snapshot()` returns `Arc<SiteSnapshot>` with minimal locking (just Arc clone)
//! - reloads use double-checked locking so concurrent callers load once
//! - `invalidate()` is lock-free (atomic flag)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, error, info, warn};
use wsadocs_nav::{
    ActiveTrail, ExpansionState, IconRegistry, ManifestError, MenuItem, RouteEntry, RouteForest,
    RouteMatch, RouteTable, normalize_location, parse_manifest, project_full_menu, project_menu,
    resolve_active_path,
};
use wsadocs_renderer::{MarkdownRenderer, escape_html};
use wsadocs_source::{DocSource, MANIFEST_KEY, SourceError, page_key};

use crate::page::{PageKind, PageView};
use crate::session::Session;

/// The manifest could not be used; the site falls back to an empty forest.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    /// Manifest could not be read.
    #[error("Failed to read manifest: {0}")]
    Source(#[from] SourceError),
    /// Manifest could not be parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteOptions {
    /// Normalized base path (`/` or `/prefix/`).
    pub base_path: String,
    /// Heading of the fallback view.
    pub welcome: String,
    /// Markdown shown when a page cannot be fetched.
    pub not_found: String,
    /// Replace emoji shortcodes.
    pub emoji: bool,
    /// Render `$…$` math.
    pub math: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            base_path: "/".to_owned(),
            welcome: "Welcome to WSADOCS!".to_owned(),
            not_found: "Page not found".to_owned(),
            emoji: true,
            math: true,
        }
    }
}

/// Parsed manifest state shared by all requests.
#[derive(Debug, Default)]
pub struct SiteSnapshot {
    forest: RouteForest,
    routes: RouteTable,
    warnings: Vec<String>,
    load_error: Option<String>,
}

impl SiteSnapshot {
    fn new(forest: RouteForest, warnings: Vec<String>) -> Self {
        let routes = RouteTable::from_forest(&forest);
        Self {
            forest,
            routes,
            warnings,
            load_error: None,
        }
    }

    fn failed(failure: &LoadFailure) -> Self {
        Self {
            load_error: Some(failure.to_string()),
            ..Self::default()
        }
    }

    /// The route forest; empty after a load failure.
    #[must_use]
    pub fn forest(&self) -> &RouteForest {
        &self.forest
    }

    /// Route table over the forest.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Manifest degradations recorded while parsing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Why the manifest could not be loaded, if it could not.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// Sidebar state for one visit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    /// Projected menu entries.
    pub items: Vec<MenuItem>,
    /// Expanded group ids.
    pub expanded: ExpansionState,
    /// Path from a root to the active node.
    pub trail: Option<ActiveTrail>,
}

/// Documentation site backed by a document source.
pub struct Site {
    source: Arc<dyn DocSource>,
    options: SiteOptions,
    icons: IconRegistry,
    /// Serializes reload operations.
    reload_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current: RwLock<Arc<SiteSnapshot>>,
    /// Snapshot validity flag.
    valid: AtomicBool,
}

impl Site {
    /// Create a site. Nothing is loaded until first use.
    #[must_use]
    pub fn new(source: Arc<dyn DocSource>, options: SiteOptions) -> Self {
        Self {
            source,
            options,
            icons: IconRegistry::new(),
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(SiteSnapshot::default())),
            valid: AtomicBool::new(false),
        }
    }

    /// Site options.
    #[must_use]
    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    /// Normalize a request path against the base path.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        normalize_location(raw, &self.options.base_path)
    }

    /// Current snapshot, loading the manifest if needed.
    ///
    /// Uses double-checked locking:
    /// 1. Fast path: return the current snapshot if valid
    /// 2. Slow path: acquire `reload_lock`, recheck, then load
    pub fn snapshot(&self) -> Arc<SiteSnapshot> {
        if self.valid.load(Ordering::Acquire) {
            return self.current();
        }

        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.valid.load(Ordering::Acquire) {
            return self.current();
        }

        let snapshot = Arc::new(self.load());
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        self.valid.store(true, Ordering::Release);
        snapshot
    }

    /// Mark the snapshot stale. The next access reloads the manifest.
    ///
    /// Current readers keep their existing `Arc<SiteSnapshot>`.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Reload the manifest now.
    pub fn refresh(&self) -> Arc<SiteSnapshot> {
        self.invalidate();
        self.snapshot()
    }

    fn current(&self) -> Arc<SiteSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn load(&self) -> SiteSnapshot {
        match self.try_load() {
            Ok(snapshot) => {
                for warning in &snapshot.warnings {
                    warn!(warning = %warning, "Malformed manifest entry");
                }
                info!(
                    source = %self.source.describe(),
                    routes = snapshot.routes.len(),
                    nodes = snapshot.forest.node_count(),
                    "Loaded navigation manifest"
                );
                snapshot
            }
            Err(failure) => {
                error!(
                    source = %self.source.describe(),
                    error = %failure,
                    "Failed to load navigation manifest"
                );
                SiteSnapshot::failed(&failure)
            }
        }
    }

    fn try_load(&self) -> Result<SiteSnapshot, LoadFailure> {
        let json = self.source.read(MANIFEST_KEY)?;
        let parsed = parse_manifest(&json)?;
        Ok(SiteSnapshot::new(parsed.forest, parsed.warnings))
    }

    /// Sidebar for a session.
    #[must_use]
    pub fn navigation(&self, snapshot: &SiteSnapshot, session: &Session) -> NavigationView {
        let location = session.location().unwrap_or_default();
        NavigationView {
            items: project_menu(&snapshot.forest, session.expansion(), location, &self.icons).items,
            expanded: session.expansion().clone(),
            trail: resolve_active_path(&snapshot.forest, location),
        }
    }

    /// Sidebar for a session with collapsed groups' children included.
    ///
    /// Used for pages that cannot ask the server again to open a group.
    #[must_use]
    pub fn full_navigation(&self, snapshot: &SiteSnapshot, session: &Session) -> NavigationView {
        let location = session.location().unwrap_or_default();
        NavigationView {
            items: project_full_menu(&snapshot.forest, session.expansion(), location, &self.icons)
                .items,
            expanded: session.expansion().clone(),
            trail: resolve_active_path(&snapshot.forest, location),
        }
    }

    /// Load and render the page for a location.
    ///
    /// Never fails: unknown locations give the welcome view and pages that
    /// cannot be fetched give the not-found placeholder with `found = false`.
    pub fn page(&self, location: &str) -> PageView {
        let snapshot = self.snapshot();
        let location = self.normalize(location);
        match snapshot.routes.resolve(&location) {
            RouteMatch::Fallback => self.welcome(location),
            RouteMatch::Page(entry) => self.render_entry(location, entry),
        }
    }

    /// The fallback view.
    #[must_use]
    pub fn welcome(&self, location: String) -> PageView {
        PageView {
            location,
            kind: PageKind::Welcome,
            found: true,
            title: Some(self.options.welcome.clone()),
            html: format!("<h1>{}</h1>", escape_html(&self.options.welcome)),
            toc: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn render_entry(&self, location: String, entry: &RouteEntry) -> PageView {
        let key = page_key(&entry.page);
        match self.source.read(&key) {
            Ok(markdown) => {
                let result = self.renderer(&entry.page).render_markdown(&markdown);
                debug!(page = %entry.page, warnings = result.warnings.len(), "Rendered page");
                PageView {
                    location,
                    kind: PageKind::Document,
                    found: true,
                    title: result.title.or_else(|| Some(entry.title.clone())),
                    html: result.html,
                    toc: result.toc,
                    warnings: result.warnings,
                }
            }
            Err(err) => {
                warn!(page = %entry.page, key = %key, error = %err, "Failed to fetch page");
                let result = self.renderer(&entry.page).render_markdown(&self.options.not_found);
                PageView {
                    location,
                    kind: PageKind::Missing,
                    found: false,
                    title: Some(entry.title.clone()),
                    html: result.html,
                    toc: Vec::new(),
                    warnings: Vec::new(),
                }
            }
        }
    }

    fn renderer(&self, page: &str) -> MarkdownRenderer {
        MarkdownRenderer::new()
            .with_base_path(self.options.base_path.clone())
            .with_page(page)
            .with_emoji(self.options.emoji)
            .with_math(self.options.math)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::thread;

    use pretty_assertions::assert_eq;
    use wsadocs_nav::{MenuKind, NodeId};
    use wsadocs_source::{FsSource, MockSource};

    use super::*;

    const MANIFEST: &str = r#"[
        {"title": "Home", "path": "", "icon": "FaInfoCircle"},
        {"title": "Guides", "icon": "FaToolbox", "children": [
            {"title": "Intro", "path": "intro"},
            {"title": "Missing", "path": "missing"}
        ]}
    ]"#;

    fn mock() -> MockSource {
        MockSource::new()
            .with_document(MANIFEST_KEY, MANIFEST)
            .with_document("docs/index.md", "# Home\n\nHello")
            .with_document("docs/intro.md", "# Introduction\n\n## Setup\n\nText")
            .with_status("docs/missing.md", 404)
    }

    fn site_with(source: MockSource) -> (Arc<MockSource>, Site) {
        let source = Arc::new(source);
        let site = Site::new(Arc::clone(&source) as Arc<dyn DocSource>, SiteOptions::default());
        (source, site)
    }

    #[test]
    fn test_manifest_loaded_once() {
        let (source, site) = site_with(mock());

        let first = site.snapshot();
        let second = site.snapshot();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.read_count(), 1);
        assert_eq!(first.routes().len(), 3);
    }

    #[test]
    fn test_refresh_reloads_manifest() {
        let (source, site) = site_with(mock());
        let first = site.snapshot();

        source.set_document(MANIFEST_KEY, r#"[{"title": "New", "path": "new"}]"#);
        let second = site.refresh();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.routes().entries()[0].path, "new");
        // Readers holding the old snapshot are unaffected
        assert_eq!(first.routes().len(), 3);
    }

    #[test]
    fn test_manifest_server_error_gives_empty_site() {
        let (_, site) = site_with(MockSource::new().with_status(MANIFEST_KEY, 500));

        let snapshot = site.snapshot();
        assert!(snapshot.forest().is_empty());
        assert!(snapshot.routes().is_empty());
        assert_eq!(
            snapshot.load_error(),
            Some("Failed to read manifest: [Mock] HTTP status 500 (path: docs/docsList.json)")
        );

        let session = Session::restore(snapshot.forest(), "", None, None);
        assert!(site.navigation(&snapshot, &session).items.is_empty());

        let view = site.page("anything");
        assert_eq!(view.kind, PageKind::Welcome);
        assert_eq!(view.html, "<h1>Welcome to WSADOCS!</h1>");
    }

    #[test]
    fn test_invalid_manifest_json_gives_empty_site() {
        let (_, site) = site_with(MockSource::new().with_document(MANIFEST_KEY, "<html>"));
        let snapshot = site.snapshot();
        assert!(snapshot.forest().is_empty());
        assert!(snapshot.load_error().unwrap().contains("not valid JSON"));
    }

    #[test]
    fn test_manifest_warnings_are_kept() {
        let (_, site) =
            site_with(MockSource::new().with_document(MANIFEST_KEY, r#"[{"path": "x"}, 3]"#));
        let snapshot = site.snapshot();
        assert_eq!(snapshot.warnings().len(), 3);
        assert_eq!(snapshot.forest().roots().len(), 1);
    }

    #[test]
    fn test_page_renders_document() {
        let (_, site) = site_with(mock());

        let view = site.page("/intro/");
        assert_eq!(view.location, "intro");
        assert_eq!(view.kind, PageKind::Document);
        assert!(view.found);
        assert_eq!(view.title.as_deref(), Some("Introduction"));
        assert!(view.html.contains(r#"<h2 id="setup">Setup</h2>"#));
        assert_eq!(view.toc.len(), 1);
    }

    #[test]
    fn test_landing_page_reads_index() {
        let (_, site) = site_with(mock());
        let view = site.page("/");
        assert_eq!(view.kind, PageKind::Document);
        assert_eq!(view.title.as_deref(), Some("Home"));
    }

    #[test]
    fn test_missing_page_gives_placeholder() {
        let (_, site) = site_with(mock());

        let view = site.page("missing");
        assert!(!view.found);
        assert_eq!(view.kind, PageKind::Missing);
        assert_eq!(view.html, "<p>Page not found</p>");
        assert_eq!(view.title.as_deref(), Some("Missing"));
        assert!(!view.html.contains("404"));
    }

    #[test]
    fn test_unknown_location_gives_welcome() {
        let (_, site) = site_with(mock());
        let view = site.page("nowhere");
        assert!(view.found);
        assert_eq!(view.kind, PageKind::Welcome);
        assert_eq!(view.title.as_deref(), Some("Welcome to WSADOCS!"));
    }

    #[test]
    fn test_custom_texts_and_base_path() {
        let source = Arc::new(mock());
        let site = Site::new(
            source,
            SiteOptions {
                base_path: "/WSADOCS/".to_owned(),
                welcome: "Olá <docs>".to_owned(),
                not_found: "**Página** não encontrada".to_owned(),
                ..SiteOptions::default()
            },
        );

        assert_eq!(site.page("/WSADOCS/nowhere").html, "<h1>Olá &lt;docs&gt;</h1>");
        assert_eq!(
            site.page("/WSADOCS/missing").html,
            "<p><strong>Página</strong> não encontrada</p>"
        );
        assert_eq!(site.page("/WSADOCS/intro").kind, PageKind::Document);
    }

    #[test]
    fn test_navigation_for_visit() {
        let (_, site) = site_with(mock());
        let snapshot = site.snapshot();
        let session = Session::restore(snapshot.forest(), "intro", None, None);

        let nav = site.navigation(&snapshot, &session);
        assert_eq!(nav.trail.unwrap().titles(), vec!["Guides", "Intro"]);
        assert_eq!(nav.expanded.to_query(), "1");
        let MenuKind::Group { children, .. } = &nav.items[1].kind else {
            panic!("expected group");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(nav.items[1].id, "1".parse::<NodeId>().unwrap());
    }

    #[test]
    fn test_full_navigation_keeps_collapsed_children() {
        let (_, site) = site_with(mock());
        let snapshot = site.snapshot();
        let session = Session::restore(snapshot.forest(), "", None, None);

        let nav = site.full_navigation(&snapshot, &session);
        assert!(nav.expanded.is_empty());
        let MenuKind::Group {
            expanded, children, ..
        } = &nav.items[1].kind
        else {
            panic!("expected group");
        };
        assert!(!expanded);
        assert_eq!(children.len(), 2);
        assert!(site.navigation(&snapshot, &session).items[1].kind != nav.items[1].kind);
    }

    #[test]
    fn test_fs_source_site() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(docs.join("guides")).unwrap();
        fs::write(
            docs.join("docsList.json"),
            r#"[{"title": "Setup", "path": "guides/setup"}]"#,
        )
        .unwrap();
        fs::write(docs.join("guides/setup.md"), "# Setup\n\nSee [intro](./intro.md).").unwrap();

        let site = Site::new(
            Arc::new(FsSource::new(temp_dir.path())),
            SiteOptions::default(),
        );
        let view = site.page("guides/setup");
        assert!(view.found);
        assert!(view.html.contains(r#"<a href="/guides/intro">intro</a>"#));
    }

    #[test]
    fn test_concurrent_access_loads_once() {
        let (source, site) = site_with(mock());
        let site = Arc::new(site);

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let site = Arc::clone(&site);
                thread::spawn(move || site.snapshot().routes().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
        assert_eq!(source.read_count(), 1);
    }
}
