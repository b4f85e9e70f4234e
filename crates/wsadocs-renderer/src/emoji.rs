//! Emoji shortcodes.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_+\-]+):").expect("valid shortcode regex"));

/// Replace `:name:` shortcodes with their emoji. Unknown codes stay as written.
pub(crate) fn replace_shortcodes(text: &str) -> Cow<'_, str> {
    if !text.contains(':') {
        return Cow::Borrowed(text);
    }
    SHORTCODE_RE.replace_all(text, |caps: &Captures<'_>| {
        emojis::get_by_shortcode(&caps[1])
            .map_or_else(|| caps[0].to_owned(), |emoji| emoji.as_str().to_owned())
    })
}
