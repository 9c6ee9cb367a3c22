//! Content render pass: final HTML (TOC + body) printed to a
//! paginated PDF with repeating header/footer templates.

use crate::config::BrandingConfig;
use crate::error::Result;
use crate::geometry::PageGeometry;
use crate::render::browser::BrowserSession;
use crate::render::html::{footer_template, header_template};
use headless_chrome::types::PrintToPdfOptions;

/// Print options derived from [`PageGeometry`]. This is the only
/// place print margins are set; the mapper divides by the same
/// geometry, and a test in `geometry` locks the px/inch agreement.
pub fn print_options(geometry: &PageGeometry) -> PrintToPdfOptions {
    let (paper_width, paper_height) = geometry.paper_size_in();
    let (top, bottom, left, right) = geometry.margins_in();
    PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(paper_width),
        paper_height: Some(paper_height),
        margin_top: Some(top),
        margin_bottom: Some(bottom),
        margin_left: Some(left),
        margin_right: Some(right),
        prefer_css_page_size: Some(false),
        ..Default::default()
    }
}

/// Render the final content PDF: TOC page followed by the body, with
/// the repeating branded header and footer.
pub fn render_content(
    session: &BrowserSession,
    html_with_toc: &str,
    branding: &BrandingConfig,
    geometry: &PageGeometry,
    header_logo_uri: &str,
) -> Result<Vec<u8>> {
    let page = session.open_html(html_with_toc)?;

    let options = PrintToPdfOptions {
        display_header_footer: Some(true),
        header_template: Some(header_template(branding, header_logo_uri)),
        footer_template: Some(footer_template(branding)),
        ..print_options(geometry)
    };

    let pdf = page.print_to_pdf(options)?;
    page.close();
    log::info!("content render produced {} bytes", pdf.len());
    Ok(pdf)
}
