//! Title page generator: a standalone one-page PDF, independent of
//! the main content.

use crate::config::BrandingConfig;
use crate::error::Result;
use crate::geometry::PageGeometry;
use crate::render::browser::BrowserSession;
use crate::render::content::print_options;
use crate::render::html::build_title_page_html;

/// Render the title page PDF: compressed large logo, resolved title,
/// client name, company name, generation date.
///
/// The logo must already be compressed and readable; missing-logo
/// configuration errors are raised by the pipeline before any browser
/// work starts.
pub fn render_title_page(
    session: &BrowserSession,
    branding: &BrandingConfig,
    title: &str,
    logo_uri: &str,
    geometry: &PageGeometry,
) -> Result<Vec<u8>> {
    let date = chrono::Local::now().format("%B %-d, %Y").to_string();
    let html = build_title_page_html(branding, title, logo_uri, &date);

    let page = session.open_html(&html)?;
    // Same paper size as the content, no repeating header/footer,
    // minimal margins so the flexbox centering owns the page.
    let mut options = print_options(geometry);
    options.margin_top = Some(0.4);
    options.margin_bottom = Some(0.4);

    let pdf = page.print_to_pdf(options)?;
    page.close();
    log::info!("title page render produced {} bytes", pdf.len());
    Ok(pdf)
}
