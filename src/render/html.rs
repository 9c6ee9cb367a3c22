//! Document HTML assembly.
//!
//! [`build_document_html`] is the single producer of the printable
//! document. Both the measurement pass (`include_toc = false`) and
//! the final render pass (`include_toc = true`) call it; aside from
//! the TOC block, its output must be byte-identical between the two,
//! or measured offsets stop describing the printed layout.

use crate::config::BrandingConfig;
use crate::model::Heading;
use crate::transform::escape_html;

/// Build the full printable HTML document.
pub fn build_document_html(
    body_html: &str,
    headings: &[Heading],
    branding: &BrandingConfig,
    include_toc: bool,
) -> String {
    let mut out = String::with_capacity(body_html.len() + 4096);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
    out.push_str(&document_css(branding));
    out.push_str("</style>\n</head>\n<body>\n");
    if include_toc {
        out.push_str(&toc_block(headings));
    }
    out.push_str(body_html);
    out.push_str("\n</body>\n</html>\n");
    out
}

/// Shared stylesheet. Identical in both passes.
fn document_css(branding: &BrandingConfig) -> String {
    let primary = branding.colors.primary.to_css();
    let secondary = branding.colors.secondary.to_css();
    format!(
        "body {{\n\
         \x20 font-family: 'Helvetica Neue', Arial, sans-serif;\n\
         \x20 font-size: 11pt;\n\
         \x20 line-height: 1.5;\n\
         \x20 color: #1a1a1a;\n\
         \x20 margin: 0;\n\
         }}\n\
         h1 {{\n\
         \x20 color: {primary};\n\
         \x20 font-size: 20pt;\n\
         \x20 border-bottom: 2px solid {primary};\n\
         \x20 padding-bottom: 4px;\n\
         \x20 page-break-before: always;\n\
         }}\n\
         h1:first-of-type {{\n\
         \x20 page-break-before: avoid;\n\
         }}\n\
         h2 {{ color: {primary}; font-size: 15pt; }}\n\
         h3 {{ color: {secondary}; font-size: 12.5pt; }}\n\
         h1, h2, h3, h4, h5, h6 {{ page-break-after: avoid; }}\n\
         p, li {{ orphans: 2; widows: 2; }}\n\
         code {{ font-family: 'SF Mono', Menlo, monospace; font-size: 9.5pt; }}\n\
         pre {{ background: #f5f6f8; padding: 8px 12px; overflow-x: hidden; }}\n\
         .toc {{ page-break-after: always; }}\n\
         .toc-title {{ color: {primary}; }}\n\
         .toc-row {{\n\
         \x20 display: flex;\n\
         \x20 justify-content: space-between;\n\
         \x20 margin: 4px 0;\n\
         \x20 border-bottom: 1px dotted {secondary};\n\
         }}\n\
         .toc-row.level-2 {{ padding-left: 1.5em; }}\n\
         .toc-page {{ color: {secondary}; }}\n"
    )
}

/// The TOC block: entries for levels 1-2 that received a page
/// number, forced onto its own page. Heading text is decoded plain
/// text, so it is re-escaped here exactly once.
fn toc_block(headings: &[Heading]) -> String {
    let mut out = String::from("<nav class=\"toc\">\n<h2 class=\"toc-title\">Table of Contents</h2>\n");
    for heading in headings.iter().filter(|h| h.in_toc()) {
        let Some(page) = heading.page_number else {
            continue;
        };
        out.push_str(&format!(
            "<p class=\"toc-row level-{}\"><span class=\"toc-text\">{}</span>\
             <span class=\"toc-page\">{}</span></p>\n",
            heading.level,
            escape_html(&heading.text),
            page
        ));
    }
    out.push_str("</nav>\n");
    out
}

/// Standalone title-page HTML: logo, title, client, company, date.
pub fn build_title_page_html(
    branding: &BrandingConfig,
    title: &str,
    logo_uri: &str,
    date: &str,
) -> String {
    let primary = branding.colors.primary.to_css();
    let secondary = branding.colors.secondary.to_css();
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n\
         body {{\n\
         \x20 font-family: 'Helvetica Neue', Arial, sans-serif;\n\
         \x20 margin: 0;\n\
         \x20 height: 100vh;\n\
         \x20 display: flex;\n\
         \x20 flex-direction: column;\n\
         \x20 justify-content: center;\n\
         \x20 align-items: center;\n\
         \x20 text-align: center;\n\
         }}\n\
         img.logo {{ max-width: 55%; margin-bottom: 48px; }}\n\
         h1 {{ color: {primary}; font-size: 28pt; margin: 0 0 16px; }}\n\
         .client {{ color: {secondary}; font-size: 16pt; margin-bottom: 64px; }}\n\
         .company {{ color: #555; font-size: 11pt; }}\n\
         .date {{ color: #888; font-size: 10pt; margin-top: 8px; }}\n\
         </style>\n</head>\n<body>\n\
         <img class=\"logo\" src=\"{logo}\" alt=\"\">\n\
         <h1>{title}</h1>\n\
         <div class=\"client\">Prepared for {client}</div>\n\
         <div class=\"company\">{company}</div>\n\
         <div class=\"date\">{date}</div>\n\
         </body>\n</html>\n",
        logo = logo_uri,
        title = escape_html(title),
        client = escape_html(&branding.client_name),
        company = escape_html(&branding.company.name),
        date = escape_html(date),
    )
}

/// Repeating page header for the print call: compressed small logo
/// and client name. Chrome requires inline styles here and cannot
/// fetch external resources, hence the data URI.
pub(crate) fn header_template(branding: &BrandingConfig, logo_uri: &str) -> String {
    format!(
        "<div style=\"width: 100%; font-size: 8pt; padding: 4px 48px 0; \
         display: flex; justify-content: space-between; align-items: center; \
         font-family: Arial, sans-serif; color: #666;\">\
         <img src=\"{}\" style=\"height: 20px;\">\
         <span>{}</span></div>",
        logo_uri,
        escape_html(&branding.client_name)
    )
}

/// Repeating page footer: company name/site and "page N / total".
pub(crate) fn footer_template(branding: &BrandingConfig) -> String {
    format!(
        "<div style=\"width: 100%; font-size: 8pt; padding: 0 48px 4px; \
         display: flex; justify-content: space-between; \
         font-family: Arial, sans-serif; color: #666;\">\
         <span>{} &middot; {}</span>\
         <span>page <span class=\"pageNumber\"></span> / \
         <span class=\"totalPages\"></span></span></div>",
        escape_html(&branding.company.name),
        escape_html(&branding.company.website)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding() -> BrandingConfig {
        BrandingConfig {
            client_name: "Acme".into(),
            ..Default::default()
        }
    }

    fn heading(id: &str, level: u8, text: &str, page: Option<u32>) -> Heading {
        Heading {
            id: id.into(),
            level,
            text: text.into(),
            page_number: page,
        }
    }

    #[test]
    fn test_toc_round_trips_measured_page_numbers() {
        let headings = vec![
            heading("heading-1", 1, "Overview", Some(3)),
            heading("heading-2", 2, "Scope", Some(4)),
            heading("heading-3", 3, "Detail", Some(4)),
            heading("heading-4", 2, "Unmeasured", None),
        ];
        let html = build_document_html("<p>body</p>", &headings, &branding(), true);

        assert!(html.contains("<span class=\"toc-text\">Overview</span><span class=\"toc-page\">3</span>"));
        assert!(html.contains("<span class=\"toc-text\">Scope</span><span class=\"toc-page\">4</span>"));
        // Level 3 and unmeasured headings stay out of the TOC.
        assert!(!html.contains("Detail</span>"));
        assert!(!html.contains("Unmeasured"));
    }

    #[test]
    fn test_passes_differ_only_by_toc_block() {
        let headings = vec![heading("heading-1", 1, "Overview", Some(3))];
        let brand = branding();
        let body = "<h1 id=\"heading-1\">Overview</h1><p>text</p>";

        let with_toc = build_document_html(body, &headings, &brand, true);
        let without_toc = build_document_html(body, &headings, &brand, false);

        let toc = toc_block(&headings);
        assert_eq!(with_toc.replacen(&toc, "", 1), without_toc);
    }

    #[test]
    fn test_toc_text_is_escaped_once() {
        let headings = vec![heading("heading-1", 1, "Q1 & Q2 <Draft>", Some(3))];
        let html = build_document_html("", &headings, &branding(), true);
        assert!(html.contains("Q1 &amp; Q2 &lt;Draft&gt;"));
        assert!(!html.contains("&amp;amp;"));
    }

    #[test]
    fn test_first_h1_exempt_from_page_break() {
        let html = build_document_html("", &[], &branding(), false);
        let break_rule = html.find("page-break-before: always").expect("h1 break rule");
        let exemption = html.find("h1:first-of-type").expect("first-h1 exemption");
        assert!(exemption > break_rule);
        assert!(html.contains("page-break-before: avoid"));
    }

    #[test]
    fn test_footer_has_page_counters() {
        let footer = footer_template(&branding());
        assert!(footer.contains("class=\"pageNumber\""));
        assert!(footer.contains("class=\"totalPages\""));
    }

    #[test]
    fn test_title_page_contains_branding() {
        let brand = BrandingConfig {
            client_name: "Acme & Co".into(),
            ..Default::default()
        };
        let html = build_title_page_html(&brand, "Annual Report", "data:image/png;base64,x", "August 28, 2026");
        assert!(html.contains("Annual Report"));
        assert!(html.contains("Prepared for Acme &amp; Co"));
        assert!(html.contains("data:image/png;base64,x"));
        assert!(html.contains("August 28, 2026"));
    }
}
