//! TeX math to MathML.

use latex2mathml::{DisplayStyle, latex_to_mathml};

use crate::state::escape_html;

/// Render TeX as MathML.
///
/// On a conversion error the TeX is shown escaped inside
/// `<code class="math-error">` and the error message is returned with it.
pub(crate) fn render_math(tex: &str, display: bool) -> (String, Option<String>) {
    let style = if display {
        DisplayStyle::Block
    } else {
        DisplayStyle::Inline
    };
    match latex_to_mathml(tex, style) {
        Ok(mathml) => (mathml, None),
        Err(err) => (
            format!(r#"<code class="math-error">{}</code>"#, escape_html(tex)),
            Some(format!("Invalid math `{tex}`: {err}")),
        ),
    }
}
