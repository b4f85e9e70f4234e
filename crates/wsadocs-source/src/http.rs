//! HTTP document source.
//!
//! Reads documents from a static HTTP origin, e.g. the directory a previous
//! `wsadocs build` was published to. Uses a blocking `ureq` agent; callers in
//! async contexts run reads on blocking worker threads.

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use ureq::Agent;

use crate::source::{DocSource, SourceError, SourceErrorKind, check_key};

/// Characters escaped in a key segment. Non-ASCII is always escaped.
const KEY_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Reads documents over HTTP(S).
pub struct HttpSource {
    agent: Agent,
    root: String,
}

impl HttpSource {
    /// Create a source rooted at `root` (a URL ending in the base path).
    #[must_use]
    pub fn new(root: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        let mut root = root.into();
        if !root.ends_with('/') {
            root.push('/');
        }

        Self { agent, root }
    }

    /// Full URL for a key, each segment percent-encoded.
    fn url_for(&self, key: &str) -> String {
        let mut url = self.root.clone();
        for (i, segment) in key.split('/').enumerate() {
            if i > 0 {
                url.push('/');
            }
            url.extend(utf8_percent_encode(segment, KEY_SEGMENT));
        }
        url
    }
}

impl DocSource for HttpSource {
    fn read(&self, key: &str) -> Result<String, SourceError> {
        check_key(key).map_err(|e| e.with_backend("Http"))?;
        let url = self.url_for(key);
        tracing::debug!(url = %url, "Fetching document");

        let response = self.agent.get(&url).call().map_err(|e| {
            SourceError::new(SourceErrorKind::Network)
                .with_backend("Http")
                .with_path(key)
                .with_source(e)
        })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let kind = if status == 404 {
                SourceErrorKind::NotFound
            } else {
                SourceErrorKind::Status(status)
            };
            return Err(SourceError::new(kind).with_backend("Http").with_path(key));
        }

        let mut body_reader = response.into_body();
        body_reader.read_to_string().map_err(|e| {
            SourceError::new(SourceErrorKind::Network)
                .with_backend("Http")
                .with_path(key)
                .with_source(e)
        })
    }

    fn describe(&self) -> String {
        self.root.clone()
    }
}
