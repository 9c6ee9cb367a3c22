//! Markdown transform pipeline.
//!
//! Applies ordered content transforms to raw markdown (table
//! beautification), renders to HTML, then applies HTML-level
//! transforms (stable heading-id assignment). The output body HTML is
//! the one piece of content shared verbatim by the measurement pass
//! and the final render pass.

mod headings;
mod tables;

pub use headings::assign_heading_ids;
pub use tables::beautify_tables;

use crate::config::BrandColors;
use crate::model::Heading;
use pulldown_cmark::{html, Options, Parser};

/// Transformed document: body HTML plus the ordered heading list.
#[derive(Debug, Clone)]
pub struct TransformedDocument {
    /// Body HTML without TOC. Shared by both render passes.
    pub html: String,

    /// Headings in document order with stable ids.
    pub headings: Vec<Heading>,
}

impl TransformedDocument {
    /// Text of the first top-level heading, used as the document
    /// title when no explicit override is configured.
    pub fn first_h1(&self) -> Option<&str> {
        self.headings
            .iter()
            .find(|h| h.level == 1)
            .map(|h| h.text.as_str())
    }
}

/// Run the full transform pipeline on raw markdown.
pub fn transform(markdown: &str, colors: &BrandColors) -> TransformedDocument {
    let beautified = beautify_tables(markdown, colors);
    let body = render_markdown(&beautified);
    let (html, headings) = assign_heading_ids(&body);
    log::debug!(
        "transformed {} bytes of markdown into {} bytes of HTML, {} headings",
        markdown.len(),
        html.len(),
        headings.len()
    );
    TransformedDocument { html, headings }
}

/// Render markdown to HTML with the off-the-shelf engine.
fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Escape text for insertion into HTML markup.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_collects_headings_in_order() {
        let doc = transform(
            "# Alpha\n\ntext\n\n## Beta\n\n# Gamma\n",
            &BrandColors::default(),
        );
        let ids: Vec<&str> = doc.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["heading-1", "heading-2", "heading-3"]);
        assert_eq!(doc.first_h1(), Some("Alpha"));
    }

    #[test]
    fn test_first_h1_skips_lower_levels() {
        let doc = transform("## Intro\n\n# Title\n", &BrandColors::default());
        assert_eq!(doc.first_h1(), Some("Title"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
    }
}
