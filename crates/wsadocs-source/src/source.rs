//! Source trait and error types.
//!
//! Provides the core [`DocSource`] trait for reading documents from a
//! document root, along with [`SourceError`] for unified error handling
//! across backends.
//!
//! # Key Convention
//!
//! All keys are relative slash paths below the document root:
//! - `"docs/docsList.json"` - the navigation manifest
//! - `"docs/intro.md"` - page `intro`
//! - `"docs/guides/setup.md"` - page `guides/setup`
//! - `"docs/index.md"` - the landing page (empty page id)

/// Manifest location relative to the document root.
pub const MANIFEST_KEY: &str = "docs/docsList.json";

/// Build the source key for a page identifier.
///
/// The empty identifier denotes the landing page and maps to `docs/index.md`.
#[must_use]
pub fn page_key(page_id: &str) -> String {
    let page_id = page_id.trim_matches('/');
    if page_id.is_empty() {
        "docs/index.md".to_owned()
    } else {
        format!("docs/{page_id}.md")
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// Document does not exist.
    NotFound,
    /// Key escapes the document root or is malformed.
    InvalidPath,
    /// HTTP origin answered with a non-success status.
    Status(u16),
    /// Request could not be completed.
    Network,
    /// Local read failed.
    Io,
    /// Document is not valid UTF-8.
    Encoding,
}

/// Source error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct SourceError {
    /// Semantic error category.
    pub kind: SourceErrorKind,
    /// Key context (if applicable).
    pub path: Option<String>,
    /// Backend identifier (e.g., "Fs", "Http", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Create a new source error.
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach key context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with key.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound).with_path(path)
    }

    /// Create a source error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SourceErrorKind::NotFound,
            std::io::ErrorKind::InvalidData => SourceErrorKind::Encoding,
            _ => SourceErrorKind::Io,
        };
        Self::new(kind).with_path(path).with_source(err)
    }

    /// True when the document is absent rather than unreadable.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            SourceErrorKind::NotFound | SourceErrorKind::Status(404)
        )
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: docs/x.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        match self.kind {
            SourceErrorKind::NotFound => write!(f, "Not found")?,
            SourceErrorKind::InvalidPath => write!(f, "Invalid path")?,
            SourceErrorKind::Status(status) => write!(f, "HTTP status {status}")?,
            SourceErrorKind::Network => write!(f, "Network error")?,
            SourceErrorKind::Io => write!(f, "I/O error")?,
            SourceErrorKind::Encoding => write!(f, "Invalid UTF-8")?,
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }

        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Reject keys that are empty, absolute, or escape the document root.
pub(crate) fn check_key(key: &str) -> Result<(), SourceError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid {
        return Err(SourceError::new(SourceErrorKind::InvalidPath).with_path(key));
    }
    Ok(())
}

/// Read-only access to a document root.
///
/// Implementations must be cheap to share across threads; the site loader
/// and page handlers call them from blocking worker threads.
pub trait DocSource: Send + Sync {
    /// Read a document as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the key is invalid, the document is missing,
    /// or it cannot be read.
    fn read(&self, key: &str) -> Result<String, SourceError>;

    /// Human-readable description of the document root, for logs.
    fn describe(&self) -> String;
}
