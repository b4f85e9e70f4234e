//! Button controls.
//!
//! Buttons come from three sources:
//! - directives, `:button[Label]{to="target"}` inline and
//!   `::button[Label]{to="target"}` on a line of its own, expanded before parsing;
//! - raw `<button>` elements with any attributes, optionally wrapping a link;
//! - raw links with the `btn` class.
//!
//! All of them become `<button type="button" class="md-button" …>` with a
//! `data-scroll` or `data-route` attribute that the viewer script acts on.
//! Raw forms are rewritten in the rendered HTML, where code has already been
//! escaped, so code blocks are never affected.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::directive::{Directive, parse_directive};
use crate::fence::FenceTracker;
use crate::link::ButtonTarget;
use crate::state::escape_html;

const DIRECTIVE_NAME: &str = "button";
const DEFAULT_LABEL: &str = "Button";

static BUTTON_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<button(\s[^>]*)?>\s*<a\s([^>]*)>(.*?)</a>.*?</button>"#)
        .expect("valid regex")
});
static BARE_BUTTON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<button(\s[^>]*)?>.*?</button>").expect("valid regex"));
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<a\s([^>]*)>(.*?)</a>").expect("valid regex"));
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bhref\s*=\s*"([^"]*)""#).expect("valid regex"));
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bclass\s*=\s*"([^"]*)""#).expect("valid regex"));
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)id\s*=\s*"([^"]*)""#).expect("valid regex"));

/// Button markup. `label_html` is inserted as is.
pub(crate) fn button_html(
    label_html: &str,
    target: &ButtonTarget,
    extra: &[String],
    id: Option<&str>,
) -> String {
    let (attr, value) = target.data_attr();
    let mut class = String::from("md-button");
    for extra_class in extra {
        class.push(' ');
        class.push_str(&escape_html(extra_class));
    }
    let id_attr = id.map_or_else(String::new, |id| format!(r#" id="{}""#, escape_html(id)));
    format!(
        r#"<button type="button" class="{class}"{id_attr} {attr}="{}">{label_html}</button>"#,
        escape_html(value)
    )
}

/// Expand button directives in markdown source.
///
/// Fenced code blocks and inline code spans are left untouched. Directives
/// with other names are kept verbatim.
pub(crate) fn expand_directives(
    markdown: &str,
    base_path: &str,
    warnings: &mut Vec<String>,
) -> String {
    let mut fence = FenceTracker::default();
    let mut out = String::with_capacity(markdown.len());

    for (index, line) in markdown.split_inclusive('\n').enumerate() {
        if fence.update(line) || fence.in_fence() {
            out.push_str(line);
            continue;
        }
        let line_no = index + 1;
        if let Some(html) = expand_leaf(line, base_path, line_no, warnings) {
            out.push_str(&html);
        } else {
            out.push_str(&expand_inline(line, base_path, line_no, warnings));
        }
    }

    out
}

/// A `::button[...]{...}` line becomes its own HTML block.
fn expand_leaf(
    line: &str,
    base_path: &str,
    line_no: usize,
    warnings: &mut Vec<String>,
) -> Option<String> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix("::")?;
    let (directive, consumed) = parse_directive(rest)?;
    if directive.name != DIRECTIVE_NAME || consumed != rest.len() {
        return None;
    }
    // Blank line after the block so following text starts a new paragraph
    Some(format!(
        "<div class=\"md-button-row\">{}</div>\n\n",
        render_directive(&directive, base_path, line_no, warnings)
    ))
}

fn expand_inline(
    line: &str,
    base_path: &str,
    line_no: usize,
    warnings: &mut Vec<String>,
) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        let Some(offset) = rest.find(['`', ':']) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..offset]);
        pos += offset;
        let rest = &line[pos..];

        if rest.starts_with('`') {
            // Copy a code span verbatim, or just the backticks if unclosed
            let ticks = rest.len() - rest.trim_start_matches('`').len();
            let span = rest[ticks..]
                .find(&rest[..ticks])
                .map_or(ticks, |end| ticks + end + ticks);
            out.push_str(&rest[..span]);
            pos += span;
            continue;
        }

        match parse_directive(&rest[1..]) {
            Some((directive, consumed)) if directive.name == DIRECTIVE_NAME => {
                out.push_str(&render_directive(&directive, base_path, line_no, warnings));
                pos += 1 + consumed;
            }
            _ => {
                out.push(':');
                pos += 1;
            }
        }
    }

    out
}

fn render_directive(
    directive: &Directive,
    base_path: &str,
    line_no: usize,
    warnings: &mut Vec<String>,
) -> String {
    let target = directive.get("to").unwrap_or_else(|| {
        warnings.push(format!("line {line_no}: button directive without a `to` target"));
        "#"
    });
    let label = directive.content.trim();
    let label = if label.is_empty() { DEFAULT_LABEL } else { label };
    button_html(
        &escape_html(label),
        &ButtonTarget::resolve(target, base_path),
        &directive.classes,
        directive.id.as_deref(),
    )
}

/// Rewrite raw HTML buttons and `btn` links in rendered HTML.
pub(crate) fn rewrite_raw_buttons(html: &str, base_path: &str) -> String {
    let html = BUTTON_LINK_RE.replace_all(html, |caps: &Captures<'_>| {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        if is_rendered_button(attrs) {
            return caps[0].to_owned();
        }
        let href = HREF_RE
            .captures(&caps[2])
            .and_then(|c| c.get(1))
            .map_or("#", |m| m.as_str());
        let label = caps[3].trim();
        let label = if label.is_empty() { DEFAULT_LABEL } else { label };
        let target = ButtonTarget::resolve(&unescape_attr(href), base_path);
        let (classes, id) = raw_class_and_id(attrs);
        button_html(label, &target, &classes, id.as_deref())
    });

    let html = BARE_BUTTON_RE.replace_all(&html, |caps: &Captures<'_>| {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        if is_rendered_button(attrs) {
            return caps[0].to_owned();
        }
        let (classes, id) = raw_class_and_id(attrs);
        button_html(
            DEFAULT_LABEL,
            &ButtonTarget::resolve("#", base_path),
            &classes,
            id.as_deref(),
        )
    });

    ANCHOR_RE
        .replace_all(&html, |caps: &Captures<'_>| {
            let attrs = &caps[1];
            let is_button = CLASS_RE
                .captures(attrs)
                .and_then(|c| c.get(1))
                .is_some_and(|m| m.as_str().split_whitespace().any(|class| class == "btn"));
            if !is_button {
                return caps[0].to_owned();
            }
            let href = HREF_RE
                .captures(attrs)
                .and_then(|c| c.get(1))
                .map_or("#", |m| m.as_str());
            let target = ButtonTarget::resolve(&unescape_attr(href), base_path);
            button_html(&caps[2], &target, &[], None)
        })
        .into_owned()
}

/// True for buttons this module already produced.
fn is_rendered_button(attrs: &str) -> bool {
    attrs.contains("data-scroll=") || attrs.contains("data-route=")
}

/// Classes and id of a raw button, carried onto the rewritten one.
fn raw_class_and_id(attrs: &str) -> (Vec<String>, Option<String>) {
    let classes = CLASS_RE
        .captures(attrs)
        .and_then(|c| c.get(1))
        .map(|m| {
            unescape_attr(m.as_str())
                .split_whitespace()
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let id = ID_RE
        .captures(attrs)
        .and_then(|c| c.get(1))
        .map(|m| unescape_attr(m.as_str()))
        .filter(|id| !id.is_empty());
    (classes, id)
}

/// Undo entity escaping of `&` and quotes in an attribute value.
fn unescape_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
