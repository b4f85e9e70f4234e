//! Directive syntax: `:name[content]{#id .class key="value"}`.
//!
//! One colon is an inline directive; two colons at the start of a line
//! make a leaf directive that occupies the whole line.

use std::collections::HashMap;

/// Parsed directive.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Directive {
    pub(crate) name: String,
    /// Content from brackets (empty if not provided).
    pub(crate) content: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: HashMap<String, String>,
}

impl Directive {
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Parse a directive starting right after its colons.
///
/// Returns the directive and the number of bytes consumed. The content
/// brackets are required; the attribute braces are optional.
pub(crate) fn parse_directive(s: &str) -> Option<(Directive, usize)> {
    let name_end = s
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len());
    let name = &s[..name_end];
    if name.is_empty() {
        return None;
    }

    let mut pos = name_end;
    let (content, consumed) = delimited(&s[pos..], '[', ']')?;
    pos += consumed;

    let mut directive = Directive {
        name: name.to_owned(),
        content: content.to_owned(),
        ..Directive::default()
    };

    if let Some((attrs, consumed)) = delimited(&s[pos..], '{', '}') {
        parse_attrs(attrs, &mut directive);
        pos += consumed;
    }

    Some((directive, pos))
}

/// Content between `open` and its matching `close`, handling nesting.
///
/// Returns (content, bytes consumed including delimiters).
fn delimited(s: &str, open: char, close: char) -> Option<(&str, usize)> {
    if !s.starts_with(open) {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[1..i], i + 1));
            }
        }
    }
    None
}

/// Parse `#id`, `.class`, `key="value"`, `key='value'` and `key=value`.
fn parse_attrs(attrs: &str, directive: &mut Directive) {
    let mut remaining = attrs.trim();

    while !remaining.is_empty() {
        remaining = remaining.trim_start();

        if let Some(rest) = remaining.strip_prefix('#') {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
                .unwrap_or(rest.len());
            directive.id = Some(rest[..end].to_owned());
            remaining = &rest[end..];
        } else if let Some(rest) = remaining.strip_prefix('.') {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
                .unwrap_or(rest.len());
            directive.classes.push(rest[..end].to_owned());
            remaining = &rest[end..];
        } else if let Some((key, value, rest)) = parse_key_value(remaining) {
            directive.attrs.insert(key.to_owned(), value.to_owned());
            remaining = rest;
        } else {
            // Skip unrecognized character
            let skip = remaining.chars().next().map_or(0, char::len_utf8);
            remaining = &remaining[skip..];
        }
    }
}

fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = s[..eq_pos].trim();

    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];

    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote) {
            let end_quote = stripped.find(quote)?;
            return Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Some((key, &after_eq[..end], &after_eq[end..]))
}
