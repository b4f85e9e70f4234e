//! Markdown to HTML event renderer.

use std::borrow::Cow;

use pulldown_cmark::{
    BlockQuoteKind, CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};

use crate::button::{expand_directives, rewrite_raw_buttons};
use crate::emoji::replace_shortcodes;
use crate::highlight::highlight;
use crate::link::resolve_link;
use crate::math::render_math;
use crate::state::{
    CodeBlockState, FootnoteState, HeadingState, ImageState, TableState, TocEntry, escape_html,
    heading_level_to_num,
};

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Text of the first H1 heading.
    pub title: Option<String>,
    /// Headings of level 2 and below.
    pub toc: Vec<TocEntry>,
    /// Problems found while rendering (invalid math, incomplete buttons).
    pub warnings: Vec<String>,
}

/// Markdown renderer for one page.
///
/// Create one renderer per document: heading ids are deduplicated and
/// footnotes numbered across everything a renderer sees.
///
/// ```
/// use wsadocs_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new()
///     .with_base_path("/docs/")
///     .with_page("guides/intro")
///     .render_markdown("# Intro\n\nSee [setup](./setup.md).");
///
/// assert_eq!(result.title.as_deref(), Some("Intro"));
/// assert!(result.html.contains(r#"<a href="/docs/guides/setup">"#));
/// ```
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    footnotes: FootnoteState,
    base_path: String,
    page: String,
    emoji: bool,
    math: bool,
    highlighting: bool,
    pending_image: Option<(String, String)>,
    /// Stack of alert kinds for nested blockquotes (regular blockquote uses None).
    alert_stack: Vec<Option<BlockQuoteKind>>,
    warnings: Vec<String>,
}

impl MarkdownRenderer {
    /// Renderer with every extension enabled and base path `/`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            footnotes: FootnoteState::default(),
            base_path: "/".to_owned(),
            page: String::new(),
            emoji: true,
            math: true,
            highlighting: true,
            pending_image: None,
            alert_stack: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Base path prefixed to rewritten links and button routes.
    ///
    /// Expected in normalized `/prefix/` form.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Page id of the document, used to resolve relative links.
    #[must_use]
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = page.into();
        self
    }

    /// Enable or disable emoji shortcodes.
    #[must_use]
    pub fn with_emoji(mut self, enabled: bool) -> Self {
        self.emoji = enabled;
        self
    }

    /// Enable or disable `$…$` / `$$…$$` math.
    #[must_use]
    pub fn with_math(mut self, enabled: bool) -> Self {
        self.math = enabled;
        self
    }

    /// Enable or disable syntax highlighting of fenced code.
    #[must_use]
    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlighting = enabled;
        self
    }

    /// Parser options for the enabled extensions.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_GFM;
        if self.math {
            options |= Options::ENABLE_MATH;
        }
        options
    }

    /// Render a markdown document.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let source = expand_directives(markdown, &self.base_path, &mut self.warnings);
        let parser = Parser::new_ext(&source, self.parser_options());
        for event in TextMergeStream::new(parser) {
            self.process_event(event);
        }

        let html = std::mem::take(&mut self.output);
        RenderResult {
            html: rewrite_raw_buttons(&html, &self.base_path),
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::InlineMath(tex) => self.push_math(&tex, false),
            Event::DisplayMath(tex) => self.push_math(&tex, true),
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html),
            Event::FootnoteReference(label) => self.footnote_reference(&label),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => self.output.push_str(if checked {
                r#"<input type="checkbox" checked disabled>"#
            } else {
                r#"<input type="checkbox" disabled>"#
            }),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(kind) => {
                self.alert_stack.push(kind);
                match kind {
                    Some(kind) => {
                        let (class, title) = alert_names(kind);
                        self.output.push_str(&format!(
                            r#"<div class="markdown-alert markdown-alert-{class}"><p class="markdown-alert-title">{title}</p>"#
                        ));
                    }
                    None => self.output.push_str("<blockquote>"),
                }
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(ToOwned::to_owned)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => self.output.push_str(&format!(r#"<ol start="{n}">"#)),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(label) => {
                let number = self.footnotes.number(&label);
                self.output.push_str(&format!(
                    r#"<div class="footnote-definition" id="fn-{}"><sup class="footnote-definition-label">{number}</sup>"#,
                    escape_html(&label)
                ));
            }
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                self.output.push_str(&format!("<{tag}{align}>"));
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = if link_type == LinkType::Email {
                    format!("mailto:{dest_url}")
                } else {
                    resolve_link(&dest_url, &self.base_path, &self.page)
                };
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, escape_html(&title))
                };
                self.push_inline(&format!(r#"<a href="{}"{title_attr}>"#, escape_html(&href)));
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the end tag
                self.image.start();
                self.pending_image = Some((dest_url.into_string(), title.into_string()));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    self.output
                        .push_str(&format!(r#"<h{level} id="{id}">{}</h{level}>"#, html.trim()));
                }
            }
            TagEnd::BlockQuote(_) => match self.alert_stack.pop() {
                Some(Some(_)) => self.output.push_str("</div>"),
                _ => self.output.push_str("</blockquote>"),
            },
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                self.code_block(lang.as_deref(), &content);
            }
            TagEnd::List(ordered) => self.output.push_str(if ordered { "</ol>" } else { "</ul>" }),
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition => self.output.push_str("</div>"),
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.table.is_in_head() { "</th>" } else { "</td>" });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    self.image(&src, &alt, &title);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }
        let text = if self.emoji {
            replace_shortcodes(text)
        } else {
            Cow::Borrowed(text)
        };
        if self.image.is_active() {
            self.image.push_str(&text);
        } else if self.heading.is_active() {
            self.heading.push_text(&text);
            self.heading.push_html(&escape_html(&text));
        } else {
            self.output.push_str(&escape_html(&text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn push_math(&mut self, tex: &str, display: bool) {
        let (html, error) = render_math(tex, display);
        if let Some(error) = error {
            self.warnings.push(error);
        }
        if self.heading.is_active() {
            self.heading.push_text(tex);
        }
        self.push_inline(&html);
    }

    fn footnote_reference(&mut self, label: &str) {
        let number = self.footnotes.number(label);
        let label = escape_html(label);
        self.push_inline(&format!(
            r##"<sup class="footnote-reference"><a href="#fn-{label}" id="fnref-{label}">{number}</a></sup>"##
        ));
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_str("\n");
        } else {
            self.push_inline("\n");
        }
    }

    fn code_block(&mut self, lang: Option<&str>, content: &str) {
        let Some(lang) = lang else {
            self.output
                .push_str(&format!("<pre><code>{}</code></pre>", escape_html(content)));
            return;
        };
        let lang_class = escape_html(lang);
        let highlighted = if self.highlighting {
            highlight(lang, content)
        } else {
            None
        };
        match highlighted {
            Some(spans) => self.output.push_str(&format!(
                r#"<pre class="hl-code"><code class="language-{lang_class}">{spans}</code></pre>"#
            )),
            None => self.output.push_str(&format!(
                r#"<pre><code class="language-{lang_class}">{}</code></pre>"#,
                escape_html(content)
            )),
        }
    }

    fn image(&mut self, src: &str, alt: &str, title: &str) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        self.push_inline(&format!(
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        ));
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn alert_names(kind: BlockQuoteKind) -> (&'static str, &'static str) {
    match kind {
        BlockQuoteKind::Note => ("note", "Note"),
        BlockQuoteKind::Tip => ("tip", "Tip"),
        BlockQuoteKind::Important => ("important", "Important"),
        BlockQuoteKind::Warning => ("warning", "Warning"),
        BlockQuoteKind::Caution => ("caution", "Caution"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(markdown: &str) -> RenderResult {
        MarkdownRenderer::new().render_markdown(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!").html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_with_id_and_toc() {
        let result = render("# Title\n\n## Section Title\n\n### Sub");
        assert_eq!(result.title.as_deref(), Some("Title"));
        assert!(result.html.contains(r#"<h1 id="title">Title</h1>"#));
        assert!(result.html.contains(r#"<h2 id="section-title">Section Title</h2>"#));
        assert_eq!(
            result.toc,
            vec![
                TocEntry {
                    level: 2,
                    title: "Section Title".to_owned(),
                    id: "section-title".to_owned(),
                },
                TocEntry {
                    level: 3,
                    title: "Sub".to_owned(),
                    id: "sub".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render("## FAQ\n\n## FAQ\n\n## FAQ");
        let ids: Vec<_> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_unicode_heading_anchor() {
        let result = render("## Instalação rápida");
        assert!(
            result
                .html
                .contains(r#"<h2 id="instalação-rápida">Instalação rápida</h2>"#)
        );
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render("## Install `npm`");
        assert!(result.html.contains("<code>npm</code>"));
        assert_eq!(result.toc[0].title, "Install npm");
    }

    #[test]
    fn test_table_alignment() {
        let result = render("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert!(result.html.contains(r#"<th style="text-align:left">A</th>"#));
        assert!(result.html.contains(r#"<td style="text-align:right">2</td>"#));
        assert!(result.html.contains("</tr></thead><tbody>"));
    }

    #[test]
    fn test_strikethrough_and_tasklist() {
        let result = render("~~gone~~\n\n- [ ] todo\n- [x] done");
        assert!(result.html.contains("<s>gone</s>"));
        assert!(result.html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(result.html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_alert_blockquote() {
        let result = render("> [!NOTE]\n> Read **this**.");
        assert!(result.html.starts_with(
            r#"<div class="markdown-alert markdown-alert-note"><p class="markdown-alert-title">Note</p>"#
        ));
        assert!(result.html.contains("<strong>this</strong>"));
        assert!(result.html.ends_with("</div>"));
    }

    #[test]
    fn test_regular_blockquote() {
        let result = render("> quote");
        assert_eq!(result.html, "<blockquote><p>quote</p></blockquote>");
    }

    #[test]
    fn test_footnotes() {
        let result = render("Text[^a].\n\n[^a]: The note.");
        assert!(result.html.contains(
            r##"<sup class="footnote-reference"><a href="#fn-a" id="fnref-a">1</a></sup>"##
        ));
        assert!(result.html.contains(r#"<div class="footnote-definition" id="fn-a">"#));
    }

    #[test]
    fn test_inline_and_display_math() {
        let result = render("Inline $x^2$ here.\n\n$$\\frac{a}{b}$$");
        assert!(result.html.contains("<msup>"));
        assert!(result.html.contains("<mfrac>"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_math_disabled() {
        let result = MarkdownRenderer::new().with_math(false).render_markdown("$x$");
        assert_eq!(result.html, "<p>$x$</p>");
    }

    #[test]
    fn test_emoji_shortcodes() {
        let result = render("Launch :rocket: and `:rocket:`");
        assert_eq!(result.html, "<p>Launch 🚀 and <code>:rocket:</code></p>");
    }

    #[test]
    fn test_emoji_disabled() {
        let result = MarkdownRenderer::new().with_emoji(false).render_markdown(":rocket:");
        assert_eq!(result.html, "<p>:rocket:</p>");
    }

    #[test]
    fn test_emoji_not_in_code_block() {
        let result = render("```\n:rocket:\n```");
        assert_eq!(result.html, "<pre><code>:rocket:\n</code></pre>");
    }

    #[test]
    fn test_raw_html_passthrough() {
        let result = render("<div class=\"custom\">\n<em>x</em>\n</div>");
        assert!(result.html.contains(r#"<div class="custom">"#));
    }

    #[test]
    fn test_highlighted_code_block() {
        let result = render("```rust\nfn main() {}\n```");
        assert!(
            result
                .html
                .starts_with(r#"<pre class="hl-code"><code class="language-rust">"#)
        );
        assert!(result.html.contains("<span class=\"hl-"));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let result = render("```nosuchlang\n<b>\n```");
        assert_eq!(
            result.html,
            r#"<pre><code class="language-nosuchlang">&lt;b&gt;
</code></pre>"#
        );
    }

    #[test]
    fn test_highlighting_disabled() {
        let result = MarkdownRenderer::new()
            .with_highlighting(false)
            .render_markdown("```rust\nlet x;\n```");
        assert!(result.html.starts_with(r#"<pre><code class="language-rust">"#));
    }

    #[test]
    fn test_relative_md_link_rewritten() {
        let result = MarkdownRenderer::new()
            .with_base_path("/WSADOCS/")
            .with_page("guides/intro")
            .render_markdown("[Next](../setup.md#linux) [Ext](https://x.dev)");
        assert!(result.html.contains(r#"<a href="/WSADOCS/setup#linux">Next</a>"#));
        assert!(result.html.contains(r#"<a href="https://x.dev">Ext</a>"#));
    }

    #[test]
    fn test_email_autolink() {
        let result = render("<dev@example.com>");
        assert!(result.html.contains(r#"<a href="mailto:dev@example.com">"#));
    }

    #[test]
    fn test_image() {
        let result = render(r#"![Alt text](img.png "Cap")"#);
        assert!(
            result
                .html
                .contains(r#"<img src="img.png" title="Cap" alt="Alt text">"#)
        );
    }

    #[test]
    fn test_button_directive_inline() {
        let result = MarkdownRenderer::new()
            .with_base_path("/W/")
            .render_markdown(r#"Go :button[Start]{to="/intro"}"#);
        assert_eq!(
            result.html,
            r#"<p>Go <button type="button" class="md-button" data-route="/W/intro">Start</button></p>"#
        );
    }

    #[test]
    fn test_button_directive_leaf() {
        let result = render("::button[Top]{to=\"#top\"}\nAfter");
        assert_eq!(
            result.html,
            "<div class=\"md-button-row\"><button type=\"button\" class=\"md-button\" data-scroll=\"#top\">Top</button></div>\n<p>After</p>"
        );
    }

    #[test]
    fn test_raw_button_forms() {
        let result = render(
            "<button><a href=\"/a\">A</a></button> <button></button> <a class=\"btn\" href=\"#b\">B</a>",
        );
        assert_eq!(
            result.html,
            concat!(
                r#"<p><button type="button" class="md-button" data-route="/a">A</button> "#,
                r##"<button type="button" class="md-button" data-scroll="#">Button</button> "##,
                r##"<button type="button" class="md-button" data-scroll="#b">B</button></p>"##
            )
        );
    }

    #[test]
    fn test_buttons_in_code_untouched() {
        let result = render("```html\n<button><a href=\"/a\">A</a></button>\n```\n\n`:button[x]{to=y}`");
        assert!(!result.html.contains("md-button"));
    }

    #[test]
    fn test_button_directive_warning() {
        let result = render(":button[Nowhere]");
        assert_eq!(result.warnings.len(), 1);
    }
}
