//! Markdown to HTML rendering for WSADOCS pages.
//!
//! [`MarkdownRenderer`] walks pulldown-cmark events and produces HTML with:
//! - GFM tables, strikethrough, task lists, footnotes and alert blockquotes
//! - `$…$` and `$$…$$` math rendered as MathML
//! - `:shortcode:` emoji
//! - heading anchors and a table of contents
//! - class-based syntax highlighting (see [`highlight_stylesheet`])
//! - relative `.md` links rewritten to viewer routes
//! - button controls from directives, raw `<button>` and `btn` links
//!
//! # Example
//!
//! ```
//! use wsadocs_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render_markdown("# Hello :wave:\n\n## Usage");
//! assert_eq!(result.title.as_deref(), Some("Hello 👋"));
//! assert_eq!(result.toc[0].id, "usage");
//! ```

mod button;
mod directive;
mod emoji;
mod fence;
mod highlight;
mod link;
mod math;
mod renderer;
mod state;

pub use highlight::{HighlightError, highlight_stylesheet};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
