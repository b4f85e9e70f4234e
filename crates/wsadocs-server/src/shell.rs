//! Viewer page markup.
//!
//! A viewer page is plain server-rendered HTML: a navbar with the site
//! brand, the sidebar menu and the content area. With [`MenuLinks::Session`]
//! sidebar state travels in the link query string (`open` and `at`), so the
//! page works without script. Static pages use [`MenuLinks::Static`]: every
//! subtree is emitted, collapsed ones `hidden`, and `viewer.js` opens them.

use std::fmt::Write;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use wsadocs_nav::{Icon, MenuItem, MenuKind, route_href};
use wsadocs_renderer::escape_html;
use wsadocs_site::{NavigationView, PageView};

/// Values shared by every viewer page.
#[derive(Clone, Copy, Debug)]
pub struct ShellContext<'a> {
    /// Normalized base path.
    pub base_path: &'a str,
    /// Brand shown in the navbar and the tab title.
    pub site_title: &'a str,
    /// How sidebar links carry the expansion state.
    pub menu_links: MenuLinks,
}

/// How the sidebar opens groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuLinks {
    /// Toggles and links are query-string links re-rendered by the server.
    Session,
    /// Plain route links; toggles are buttons handled in the page.
    Static,
}

/// Render a complete viewer page.
#[must_use]
pub fn render_shell(ctx: ShellContext<'_>, nav: &NavigationView, page: &PageView) -> String {
    let base = ctx.base_path;
    let mut out = String::with_capacity(page.html.len() + 4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        out,
        "<title>{}</title>",
        escape_html(&page.document_title(ctx.site_title))
    );
    let _ = writeln!(out, r#"<link rel="stylesheet" href="{base}assets/viewer.css">"#);
    let _ = writeln!(out, r#"<link rel="stylesheet" href="{base}assets/highlight.css">"#);
    let _ = writeln!(out, r#"<script src="{base}assets/viewer.js" defer></script>"#);
    out.push_str("</head>\n<body>\n");

    let _ = writeln!(
        out,
        concat!(
            r#"<header class="navbar">"#,
            r#"<button type="button" class="navbar-menu" data-menu-toggle aria-controls="sidebar" aria-label="Menu">&#9776;</button>"#,
            r#"<a class="navbar-brand" href="{}">{}</a>"#,
            "</header>"
        ),
        escape_html(base),
        escape_html(ctx.site_title)
    );

    out.push_str("<div class=\"layout\">\n<aside class=\"sidebar\" id=\"sidebar\">\n<nav aria-label=\"Documentation\">\n");
    let links = LinkState {
        base,
        location: &page.location,
        nav,
        mode: ctx.menu_links,
    };
    render_menu(&mut out, &nav.items, &links, false);
    out.push_str("</nav>\n</aside>\n");

    out.push_str("<main class=\"content\">\n");
    let _ = writeln!(
        out,
        r#"<article class="markdown-body{}">{}</article>"#,
        if page.found { "" } else { " not-found" },
        page.html
    );
    render_toc(&mut out, page);
    out.push_str("</main>\n</div>\n</body>\n</html>\n");

    out
}

/// What menu links need to carry the session forward.
struct LinkState<'a> {
    base: &'a str,
    location: &'a str,
    nav: &'a NavigationView,
    mode: MenuLinks,
}

impl LinkState<'_> {
    /// Href to `path` carrying `open` and the current location.
    fn href(&self, path: &str, open: &str) -> String {
        if self.mode == MenuLinks::Static {
            return route_href(self.base, path);
        }
        format!(
            "{}?open={}&at={}",
            route_href(self.base, path),
            utf8_percent_encode(open, NON_ALPHANUMERIC),
            utf8_percent_encode(self.location, NON_ALPHANUMERIC)
        )
    }
}

fn render_menu(out: &mut String, items: &[MenuItem], links: &LinkState<'_>, hidden: bool) {
    if items.is_empty() {
        return;
    }
    out.push_str(if hidden {
        "<ul class=\"menu\" hidden>\n"
    } else {
        "<ul class=\"menu\">\n"
    });
    for item in items {
        render_item(out, item, links);
    }
    out.push_str("</ul>\n");
}

fn render_item(out: &mut String, item: &MenuItem, links: &LinkState<'_>) {
    let title = escape_html(&item.title);
    let icon = item.icon.svg();

    match &item.kind {
        MenuKind::Group {
            ancestor_active,
            expanded,
            children,
            ..
        } if links.mode == MenuLinks::Static => {
            let _ = writeln!(
                out,
                r#"<li class="menu-group"><button type="button" class="menu-item menu-toggle{}" aria-expanded="{expanded}" data-node="{}" data-menu-group>{icon}<span class="menu-title">{title}</span><span class="menu-chevron">{}</span></button>"#,
                if *ancestor_active { " ancestor-active" } else { "" },
                item.id,
                Icon::ChevronDown.svg()
            );
            render_menu(out, children, links, !expanded);
            out.push_str("</li>\n");
        }
        MenuKind::Group {
            ancestor_active,
            expanded,
            children,
            ..
        } => {
            // Toggling stays on the current page
            let toggled = links.nav.expanded.toggled(&item.id).to_query();
            let href = links.href(links.location, &toggled);
            let chevron = if *expanded {
                Icon::ChevronDown
            } else {
                Icon::ChevronRight
            };
            let _ = writeln!(
                out,
                r#"<li class="menu-group"><a class="menu-item menu-toggle{}" href="{}" aria-expanded="{expanded}" data-node="{}">{icon}<span class="menu-title">{title}</span>{}</a>"#,
                if *ancestor_active { " ancestor-active" } else { "" },
                escape_html(&href),
                item.id,
                chevron.svg()
            );
            if *expanded {
                render_menu(out, children, links, false);
            }
            out.push_str("</li>\n");
        }
        MenuKind::Link { path, active } => {
            let href = links.href(path, &links.nav.expanded.to_query());
            let _ = writeln!(
                out,
                r#"<li><a class="menu-item menu-link{}" href="{}"{} data-close-menu>{icon}<span class="menu-title">{title}</span></a></li>"#,
                if *active { " active" } else { "" },
                escape_html(&href),
                if *active { r#" aria-current="page""# } else { "" }
            );
        }
        MenuKind::Label => {
            let _ = writeln!(
                out,
                r#"<li><span class="menu-item menu-label">{icon}<span class="menu-title">{title}</span></span></li>"#
            );
        }
    }
}

fn render_toc(out: &mut String, page: &PageView) {
    if page.toc.is_empty() {
        return;
    }
    out.push_str("<nav class=\"toc\" aria-label=\"On this page\">\n<p class=\"toc-title\">On this page</p>\n<ul>\n");
    for entry in &page.toc {
        let _ = writeln!(
            out,
            r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title)
        );
    }
    out.push_str("</ul>\n</nav>\n");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wsadocs_site::{Session, Site, SiteOptions};
    use wsadocs_source::{MANIFEST_KEY, MockSource};

    use super::*;

    const MANIFEST: &str = r#"[
        {"title": "Home", "path": "", "icon": "FaInfoCircle"},
        {"title": "Guides", "icon": "FaToolbox", "children": [
            {"title": "Intro", "path": "intro"},
            {"title": "Setup & Run", "path": "setup run"}
        ]},
        {"title": "Soon"}
    ]"#;

    fn render(location: &str, open: Option<&str>, at: Option<&str>) -> String {
        render_with(location, open, at, MenuLinks::Session)
    }

    fn render_with(
        location: &str,
        open: Option<&str>,
        at: Option<&str>,
        menu_links: MenuLinks,
    ) -> String {
        let source = MockSource::new()
            .with_document(MANIFEST_KEY, MANIFEST)
            .with_document("docs/intro.md", "# Intro\n\n## Steps\n\nText");
        let site = Site::new(
            Arc::new(source),
            SiteOptions {
                base_path: "/W/".to_owned(),
                ..SiteOptions::default()
            },
        );
        let snapshot = site.snapshot();
        let session = Session::restore(snapshot.forest(), location, open, at);
        let nav = match menu_links {
            MenuLinks::Session => site.navigation(&snapshot, &session),
            MenuLinks::Static => site.full_navigation(&snapshot, &session),
        };
        let page = site.page(location);
        render_shell(
            ShellContext {
                base_path: "/W/",
                site_title: "Docs",
                menu_links,
            },
            &nav,
            &page,
        )
    }

    #[test]
    fn test_navbar_brand_links_to_base() {
        let html = render("intro", None, None);
        assert!(html.contains(r#"<a class="navbar-brand" href="/W/">Docs</a>"#));
        assert!(html.contains("<title>Intro | Docs</title>"));
        assert!(html.contains(r#"href="/W/assets/viewer.css""#));
    }

    #[test]
    fn test_active_link_and_expanded_group() {
        let html = render("intro", None, None);
        assert!(html.contains(
            r#"<a class="menu-item menu-link active" href="/W/intro?open=1&amp;at=intro" aria-current="page" data-close-menu>"#
        ));
        assert!(html.contains(r#"class="menu-item menu-toggle ancestor-active" href="/W/intro?open=&amp;at=intro" aria-expanded="true""#));
        assert!(html.contains(Icon::ChevronDown.svg()));
        assert!(html.contains("Setup &amp; Run"));
        assert!(html.contains(r#"href="/W/setup%20run?open=1&amp;at=intro""#));
    }

    #[test]
    fn test_collapsed_group_hides_children() {
        let html = render("", None, None);
        assert!(html.contains(r#"href="/W/?open=1&amp;at=" aria-expanded="false""#));
        assert!(html.contains(Icon::ChevronRight.svg()));
        assert!(!html.contains("/W/intro?"));
    }

    #[test]
    fn test_toggle_request_opens_group() {
        let html = render("", Some("1"), Some(""));
        assert!(html.contains(r#"href="/W/?open=&amp;at=" aria-expanded="true""#));
        assert!(html.contains(r#"href="/W/intro?open=1&amp;at=""#));
        assert!(html.contains(Icon::ChevronDown.svg()));
    }

    #[test]
    fn test_group_with_active_child_stays_expanded() {
        let html = render("intro", Some(""), Some("intro"));
        assert!(html.contains(r#"href="/W/intro?open=1&amp;at=intro" aria-expanded="true""#));
        assert!(html.contains("menu-link active"));
    }

    #[test]
    fn test_static_menu_hides_collapsed_children() {
        let html = render_with("", None, None, MenuLinks::Static);
        assert!(html.contains(
            r#"<button type="button" class="menu-item menu-toggle" aria-expanded="false" data-node="1" data-menu-group>"#
        ));
        assert!(html.contains("<ul class=\"menu\" hidden>"));
        assert!(html.contains(r#"<a class="menu-item menu-link" href="/W/intro" data-close-menu>"#));
        assert!(html.contains(r#"href="/W/setup%20run""#));
        assert!(!html.contains("?open="));
    }

    #[test]
    fn test_static_menu_shows_active_branch() {
        let html = render_with("intro", None, None, MenuLinks::Static);
        assert!(html.contains(r#"class="menu-item menu-toggle ancestor-active" aria-expanded="true""#));
        assert!(!html.contains("<ul class=\"menu\" hidden>"));
        assert!(html.contains(r#"href="/W/intro" aria-current="page""#));
    }

    #[test]
    fn test_label_is_not_a_link() {
        let html = render("", None, None);
        assert!(html.contains(r#"<span class="menu-item menu-label">"#));
        assert!(html.contains("<span class=\"menu-title\">Soon</span></span>"));
    }

    #[test]
    fn test_toc_rendered() {
        let html = render("intro", None, None);
        assert!(html.contains(r##"<li class="toc-level-2"><a href="#steps">Steps</a></li>"##));
    }

    #[test]
    fn test_missing_page_marked() {
        let html = render("setup run", None, None);
        assert!(html.contains(r#"<article class="markdown-body not-found"><p>Page not found</p></article>"#));
    }

    #[test]
    fn test_welcome_view() {
        let html = render("unknown", None, None);
        assert!(html.contains("<h1>Welcome to WSADOCS!</h1>"));
        assert!(html.contains("<title>Docs</title>"));
    }
}
