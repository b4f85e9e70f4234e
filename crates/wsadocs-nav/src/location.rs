//! Location normalization and route hrefs.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped in route hrefs. `/` stays literal so nested paths
/// remain readable.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
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

/// Normalize a request path into a route location.
///
/// Drops any query or fragment, strips `base_path` (a normalized
/// `/prefix/`), percent-decodes, and trims leading and trailing slashes.
/// The base itself, with or without its trailing slash, becomes `""`.
///
/// ```
/// use wsadocs_nav::normalize_location;
///
/// assert_eq!(normalize_location("/WSADOCS/guides/intro/", "/WSADOCS/"), "guides/intro");
/// assert_eq!(normalize_location("/WSADOCS", "/WSADOCS/"), "");
/// ```
#[must_use]
pub fn normalize_location(raw: &str, base_path: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let base_trimmed = base_path.trim_end_matches('/');

    let relative = if let Some(rest) = path.strip_prefix(base_path) {
        rest
    } else if path == base_trimmed {
        ""
    } else {
        path
    };

    percent_decode_str(relative)
        .decode_utf8_lossy()
        .trim_matches('/')
        .to_owned()
}

/// Absolute href for a route path under the base path.
///
/// ```
/// use wsadocs_nav::route_href;
///
/// assert_eq!(route_href("/WSADOCS/", "guides/intro"), "/WSADOCS/guides/intro");
/// assert_eq!(route_href("/", ""), "/");
/// ```
#[must_use]
pub fn route_href(base_path: &str, path: &str) -> String {
    let path = path.trim_matches('/');
    format!("{base_path}{}", utf8_percent_encode(path, PATH_SEGMENT))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_strips_base_and_trailing_slash() {
        assert_eq!(normalize_location("/WSADOCS/intro/", "/WSADOCS/"), "intro");
        assert_eq!(normalize_location("/WSADOCS/a/b", "/WSADOCS/"), "a/b");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_location("/", "/"), "");
        assert_eq!(normalize_location("/WSADOCS/", "/WSADOCS/"), "");
        assert_eq!(normalize_location("/WSADOCS", "/WSADOCS/"), "");
        assert_eq!(normalize_location("", "/"), "");
    }

    #[test]
    fn test_normalize_without_base_prefix() {
        assert_eq!(normalize_location("intro", "/WSADOCS/"), "intro");
        assert_eq!(normalize_location("/other/intro/", "/WSADOCS/"), "other/intro");
    }

    #[test]
    fn test_normalize_drops_query_and_fragment() {
        assert_eq!(normalize_location("/intro?open=0&at=x", "/"), "intro");
        assert_eq!(normalize_location("/intro#setup", "/"), "intro");
    }

    #[test]
    fn test_normalize_percent_decodes() {
        assert_eq!(
            normalize_location("/instala%C3%A7%C3%A3o", "/"),
            "instalação"
        );
    }

    #[test]
    fn test_route_href_encodes_reserved() {
        assert_eq!(route_href("/", "instalação"), "/instala%C3%A7%C3%A3o");
        assert_eq!(route_href("/", "a b?c"), "/a%20b%3Fc");
        assert_eq!(route_href("/WSADOCS/", "/guides/"), "/WSADOCS/guides");
    }
}
