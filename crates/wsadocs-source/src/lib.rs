//! Document source abstraction for WSADOCS.
//!
//! A [`DocSource`] reads the navigation manifest and page Markdown from a
//! document root. Keys are relative slash paths such as `docs/docsList.json`
//! or `docs/guides/intro.md`; [`MANIFEST_KEY`] and [`page_key`] build them.
//!
//! # Backends
//!
//! - [`FsSource`] reads from a local directory
//! - [`HttpSource`] reads from an HTTP origin (static hosting)
//! - [`MockSource`] keeps documents in memory (behind `mock` feature flag)

mod fs;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use fs::FsSource;
pub use http::HttpSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{DocSource, MANIFEST_KEY, SourceError, SourceErrorKind, page_key};
