//! Site state and page rendering for WSADOCS.
//!
//! This crate provides:
//! - [`Site`]: manifest loading with memoization and explicit refresh
//! - [`PageView`]: rendered content for a location, including the welcome
//!   and not-found views
//! - [`Session`]: per-visit location and sidebar expansion
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use wsadocs_site::{Session, Site, SiteOptions};
//! use wsadocs_source::FsSource;
//!
//! let site = Site::new(Arc::new(FsSource::new("public")), SiteOptions::default());
//! let snapshot = site.snapshot();
//!
//! let session = Session::restore(snapshot.forest(), "intro", None, None);
//! let nav = site.navigation(&snapshot, &session);
//! let page = site.page("intro");
//! ```

mod page;
mod session;
mod site;

pub use page::{PageKind, PageView};
pub use session::Session;
pub use site::{LoadFailure, NavigationView, Site, SiteOptions, SiteSnapshot};

// Re-export TocEntry from wsadocs-renderer for convenience
pub use wsadocs_renderer::TocEntry;
