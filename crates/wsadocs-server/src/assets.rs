//! Viewer assets.
//!
//! The stylesheet and script are compiled into the binary. The highlighting
//! stylesheet depends on the configured theme and is passed in by the caller.

/// Viewer stylesheet.
pub const VIEWER_CSS: &str = include_str!("../assets/viewer.css");

/// Viewer script: button controls and the mobile menu.
pub const VIEWER_JS: &str = include_str!("../assets/viewer.js");

/// Asset names served under `{base}assets/`.
pub const ASSET_NAMES: [&str; 3] = ["viewer.css", "viewer.js", "highlight.css"];

/// One asset ready to serve or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Asset<'a> {
    /// File name.
    pub name: &'static str,
    /// MIME type.
    pub content_type: &'static str,
    /// File contents.
    pub body: &'a str,
}

/// Look up an asset by name.
#[must_use]
pub fn get<'a>(name: &str, highlight_css: &'a str) -> Option<Asset<'a>> {
    match name {
        "viewer.css" => Some(Asset {
            name: "viewer.css",
            content_type: "text/css; charset=utf-8",
            body: VIEWER_CSS,
        }),
        "viewer.js" => Some(Asset {
            name: "viewer.js",
            content_type: "text/javascript; charset=utf-8",
            body: VIEWER_JS,
        }),
        "highlight.css" => Some(Asset {
            name: "highlight.css",
            content_type: "text/css; charset=utf-8",
            body: highlight_css,
        }),
        _ => None,
    }
}

/// Every asset, in [`ASSET_NAMES`] order.
pub fn all(highlight_css: &str) -> impl Iterator<Item = Asset<'_>> {
    ASSET_NAMES
        .iter()
        .filter_map(move |name| get(name, highlight_css))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_assets() {
        let css = get("viewer.css", "").unwrap();
        assert!(css.content_type.starts_with("text/css"));
        assert!(css.body.contains(".md-button"));

        let js = get("viewer.js", "").unwrap();
        assert!(js.body.contains("data-route"));
        assert!(js.body.contains("data-menu-group"));

        assert_eq!(get("highlight.css", ".hl-x {}").unwrap().body, ".hl-x {}");
    }

    #[test]
    fn test_unknown_asset() {
        assert!(get("../secret", "").is_none());
        assert!(get("app.js", "").is_none());
    }

    #[test]
    fn test_all_assets() {
        let names: Vec<_> = all("").map(|asset| asset.name).collect();
        assert_eq!(names, ASSET_NAMES);
    }
}
