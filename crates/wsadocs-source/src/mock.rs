//! Mock document source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem or network
//! access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::source::{DocSource, SourceError, SourceErrorKind, check_key};

/// Mock source for testing.
///
/// Stores documents in memory. Keys can also be configured to fail with an
/// HTTP-like status, and every read is counted so tests can assert on
/// memoization.
///
/// # Example
///
/// ```ignore
/// use wsadocs_source::{DocSource, MockSource, MANIFEST_KEY};
///
/// let source = MockSource::new()
///     .with_document(MANIFEST_KEY, r#"[{"title": "Intro", "path": "intro"}]"#)
///     .with_status("docs/missing.md", 404);
///
/// let manifest = source.read(MANIFEST_KEY).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    documents: RwLock<HashMap<String, String>>,
    statuses: RwLock<HashMap<String, u16>>,
    reads: AtomicUsize,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.set_document(key, content);
        self
    }

    /// Make reads of `key` fail with an HTTP status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, key: impl Into<String>, status: u16) -> Self {
        self.statuses.write().unwrap().insert(key.into(), status);
        self
    }

    /// Add or replace a document after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_document(&self, key: impl Into<String>, content: impl Into<String>) {
        let key = key.into();
        self.statuses.write().unwrap().remove(&key);
        self.documents.write().unwrap().insert(key, content.into());
    }

    /// Number of `read` calls so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl DocSource for MockSource {
    fn read(&self, key: &str) -> Result<String, SourceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        check_key(key).map_err(|e| e.with_backend("Mock"))?;

        if let Some(&status) = self.statuses.read().unwrap().get(key) {
            let kind = if status == 404 {
                SourceErrorKind::NotFound
            } else {
                SourceErrorKind::Status(status)
            };
            return Err(SourceError::new(kind).with_backend("Mock").with_path(key));
        }

        self.documents
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::not_found(key).with_backend("Mock"))
    }

    fn describe(&self) -> String {
        "mock".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_document() {
        let source = MockSource::new().with_document("docs/a.md", "# A");
        assert_eq!(source.read("docs/a.md").unwrap(), "# A");
        assert_eq!(source.read_count(), 1);
    }

    #[test]
    fn test_read_status() {
        let source = MockSource::new().with_status("docs/docsList.json", 500);
        let err = source.read("docs/docsList.json").unwrap_err();
        assert_eq!(err.kind, SourceErrorKind::Status(500));
    }

    #[test]
    fn test_set_document_clears_status() {
        let source = MockSource::new().with_status("docs/a.md", 404);
        source.set_document("docs/a.md", "back");
        assert_eq!(source.read("docs/a.md").unwrap(), "back");
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let source = MockSource::new();
        assert!(source.read("docs/x.md").unwrap_err().is_not_found());
    }
}
