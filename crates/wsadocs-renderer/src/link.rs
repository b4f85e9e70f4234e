//! Link and button target resolution.

use wsadocs_nav::route_href;

/// Where a button control sends the reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ButtonTarget {
    /// Smooth scroll to an anchor on the current page (`#id`).
    Scroll(String),
    /// Client-side navigation to an href.
    Route(String),
}

impl ButtonTarget {
    /// Resolve a raw target: `#…` scrolls, anything else navigates.
    ///
    /// External URLs are kept; other targets are viewer routes under `base_path`.
    pub(crate) fn resolve(target: &str, base_path: &str) -> Self {
        let target = target.trim();
        if target.is_empty() || target.starts_with('#') {
            let anchor = if target.is_empty() { "#" } else { target };
            return Self::Scroll(anchor.to_owned());
        }
        if is_external(target) {
            return Self::Route(target.to_owned());
        }
        let path = target.trim_start_matches("./");
        Self::Route(route_href(base_path, path.strip_suffix(".md").unwrap_or(path)))
    }

    /// `data-*` attribute carrying the target.
    pub(crate) fn data_attr(&self) -> (&'static str, &str) {
        match self {
            Self::Scroll(anchor) => ("data-scroll", anchor),
            Self::Route(href) => ("data-route", href),
        }
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("//")
        || url
            .split_once(':')
            .is_some_and(|(scheme, _)| !scheme.is_empty() && !scheme.contains('/'))
}

/// Resolve a markdown link relative to the page it appears on.
///
/// Relative `.md` links become viewer routes under `base_path`:
/// - `./sibling.md` from `guides/intro` → `{base}guides/sibling`
/// - `../other.md` from `guides/intro` → `{base}other`
/// - `/setup.md` → `{base}setup`
/// - `sub/index.md` from `guides/intro` → `{base}guides/sub`
///
/// External links, fragment-only links, and non-markdown links are returned unchanged.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
pub(crate) fn resolve_link(url: &str, base_path: &str, page: &str) -> String {
    if url.starts_with('#') || is_external(url) {
        return url.to_owned();
    }

    let (path_part, fragment) = match url.find('#') {
        Some(hash_pos) => (&url[..hash_pos], &url[hash_pos..]),
        None => (url, ""),
    };

    if !path_part.ends_with(".md") {
        return url.to_owned();
    }

    let resolved = if path_part.starts_with('/') {
        path_part.trim_start_matches('/').to_owned()
    } else {
        resolve_relative_path(path_part, page_dir(page))
    };

    let clean = resolved.strip_suffix(".md").unwrap_or(&resolved);
    let clean = match clean.strip_suffix("index") {
        Some(dir) if dir.is_empty() || dir.ends_with('/') => dir,
        _ => clean,
    };

    format!("{}{fragment}", route_href(base_path, clean))
}

/// Directory of a page id: everything before the last segment.
fn page_dir(page: &str) -> &str {
    page.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Resolve a relative path against a directory.
///
/// `..` never climbs above the root.
fn resolve_relative_path(relative: &str, dir: &str) -> String {
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}
