//! Syntax highlighting for fenced code blocks.
//!
//! Highlighted code is emitted as class-based spans (`hl-` prefix), so the
//! colours live in a separate stylesheet generated from a theme.

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Stylesheet generation error.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// Theme name is not one of the bundled themes.
    #[error("Unknown highlight theme '{name}' (available: {available})")]
    UnknownTheme { name: String, available: String },
    /// Theme could not be converted to CSS.
    #[error("Failed to generate highlight stylesheet: {0}")]
    Css(#[from] syntect::Error),
}

/// Highlight `code` as `lang`.
///
/// Returns `None` when the language is unknown, so the caller can fall back
/// to plain escaped output.
pub(crate) fn highlight(lang: &str, code: &str) -> Option<String> {
    let syntax = SYNTAXES.find_syntax_by_token(lang)?;
    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .ok()?;
    }
    Some(generator.finalize())
}

/// CSS for highlighted code using one of the bundled themes.
///
/// # Errors
///
/// Returns [`HighlightError::UnknownTheme`] if `theme` is not bundled.
pub fn highlight_stylesheet(theme: &str) -> Result<String, HighlightError> {
    let Some(theme_def) = THEMES.themes.get(theme) else {
        return Err(HighlightError::UnknownTheme {
            name: theme.to_owned(),
            available: THEMES
                .themes
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        });
    };
    Ok(css_for_theme_with_class_style(theme_def, CLASS_STYLE)?)
}
