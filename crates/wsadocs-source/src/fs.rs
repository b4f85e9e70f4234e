//! Filesystem document source.

use std::path::PathBuf;

use crate::source::{DocSource, SourceError, check_key};

/// Reads documents from a local directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Document root directory.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl DocSource for FsSource {
    fn read(&self, key: &str) -> Result<String, SourceError> {
        check_key(key).map_err(|e| e.with_backend("Fs"))?;
        let path = key
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment));
        tracing::debug!(path = %path.display(), "Reading document");
        std::fs::read_to_string(&path).map_err(|e| SourceError::io(e, key).with_backend("Fs"))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
