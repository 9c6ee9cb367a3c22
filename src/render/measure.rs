//! Position measurement pass.
//!
//! Renders the transformed content without the TOC and measures each
//! heading's absolute document-flow Y offset: bounding-box top plus
//! current scroll offset. The print engine exposes no
//! pagination-aware API, so these offsets are the only input the
//! page-number mapper gets; this pass and the final render must load
//! byte-identical body HTML.

use crate::error::{Error, Result};
use crate::model::{Heading, MeasurementResult};
use crate::render::browser::BrowserSession;
use std::collections::HashMap;

/// Measure the absolute Y offset of every known heading id.
///
/// A heading whose id cannot be found yields no offset; that is
/// tolerated, not fatal, and shows up in the success/total counts.
pub fn measure_heading_positions(
    session: &BrowserSession,
    html_without_toc: &str,
    headings: &[Heading],
) -> Result<MeasurementResult> {
    let page = session.open_html(html_without_toc)?;

    let ids: Vec<&str> = headings.iter().map(|h| h.id.as_str()).collect();
    let ids_json = serde_json::to_string(&ids)
        .map_err(|e| Error::Measure(format!("id list: {}", e)))?;

    let script = format!(
        "JSON.stringify((() => {{\n\
         \x20 const ids = {ids_json};\n\
         \x20 const out = {{}};\n\
         \x20 for (const id of ids) {{\n\
         \x20   const el = document.getElementById(id);\n\
         \x20   if (el) {{\n\
         \x20     out[id] = el.getBoundingClientRect().top + window.scrollY;\n\
         \x20   }}\n\
         \x20 }}\n\
         \x20 return out;\n\
         }})())"
    );

    let value = page.evaluate_json(&script)?;
    page.close();

    let raw: HashMap<String, f64> = serde_json::from_value(value)
        .map_err(|e| Error::Measure(format!("offset map: {}", e)))?;

    let total = headings.len();
    let measured = raw.len();
    if measured < total {
        for heading in headings {
            if !raw.contains_key(&heading.id) {
                log::debug!("heading {} ({:?}) not found in layout", heading.id, heading.text);
            }
        }
    }
    log::info!("measured {}/{} heading positions", measured, total);

    Ok(MeasurementResult {
        offsets: raw,
        measured,
        total,
    })
}

/// Fill in page numbers on the heading list from measured offsets.
/// Headings without an offset keep `page_number = None`.
pub fn apply_page_numbers(
    headings: &mut [Heading],
    result: &MeasurementResult,
    geometry: &crate::geometry::PageGeometry,
) {
    for heading in headings.iter_mut() {
        heading.page_number = result.offsets.get(&heading.id).map(|y| {
            let page = geometry.page_number(*y);
            log::debug!("{} '{}' at y={:.1} -> page {}", heading.id, heading.text, y, page);
            page
        });
    }
}
