//! Optional layout validator: detects header/content overlap after
//! rendering.
//!
//! Samples a bounded subset of pages (the first few, a midpoint, and
//! the last) rather than every page, trading completeness for speed.
//! The result is advisory only: it is logged as a warning and never
//! blocks output.

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::model::ValidationResult;
use crate::render::browser::BrowserSession;
use std::collections::HashMap;

/// How many leading pages are always sampled.
const LEADING_PAGES: u32 = 3;

/// Choose which pages to sample for a document of `total` pages:
/// the first few, a midpoint, and the last, deduplicated and sorted.
pub fn sample_pages(total: u32) -> Vec<u32> {
    let mut pages: Vec<u32> = (1..=total.min(LEADING_PAGES)).collect();
    if total > LEADING_PAGES {
        pages.push(total.div_ceil(2));
        pages.push(total);
    }
    pages.sort_unstable();
    pages.dedup();
    pages
}

/// Judge sampled first-content offsets against the required content
/// margin. `samples` pairs a page number with the offset-within-page
/// of its first content element, or `None` when the page had no
/// measurable element.
pub fn evaluate_samples(samples: &[(u32, Option<f64>)], required_margin_px: f64) -> ValidationResult {
    let mut result = ValidationResult {
        has_overlap: false,
        worst_page: None,
        worst_clearance_px: f64::INFINITY,
        pages_sampled: samples.iter().map(|(page, _)| *page).collect(),
    };

    for (page, offset) in samples {
        let Some(offset) = offset else { continue };
        let clearance = offset - required_margin_px;
        if clearance < result.worst_clearance_px {
            result.worst_clearance_px = clearance;
            result.worst_page = Some(*page);
        }
        if clearance < 0.0 {
            result.has_overlap = true;
        }
    }

    if result.worst_page.is_none() {
        result.worst_clearance_px = 0.0;
    }
    result
}

/// Re-render the no-TOC HTML, estimate the page count from scroll
/// height, and check sampled pages for content that starts inside the
/// header zone.
pub fn validate_layout(
    session: &BrowserSession,
    html_without_toc: &str,
    geometry: &PageGeometry,
) -> Result<ValidationResult> {
    let page = session.open_html(html_without_toc)?;

    let scroll_height = match page.evaluate_json("document.body.scrollHeight")? {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        other => {
            return Err(Error::Measure(format!(
                "unexpected scroll height value: {}",
                other
            )))
        }
    };
    let total = geometry.estimate_page_count(scroll_height);
    let pages = sample_pages(total);
    let usable = geometry.usable_height_px();

    let pages_json = serde_json::to_string(&pages)
        .map_err(|e| Error::Measure(format!("page list: {}", e)))?;
    let script = format!(
        "JSON.stringify((() => {{\n\
         \x20 const usable = {usable};\n\
         \x20 const pages = {pages_json};\n\
         \x20 const tops = [];\n\
         \x20 for (const el of document.body.querySelectorAll('*')) {{\n\
         \x20   const rect = el.getBoundingClientRect();\n\
         \x20   if (rect.height > 0) {{\n\
         \x20     tops.push(rect.top + window.scrollY);\n\
         \x20   }}\n\
         \x20 }}\n\
         \x20 tops.sort((a, b) => a - b);\n\
         \x20 const out = {{}};\n\
         \x20 for (const page of pages) {{\n\
         \x20   const start = (page - 1) * usable;\n\
         \x20   const end = page * usable;\n\
         \x20   const first = tops.find((y) => y >= start && y < end);\n\
         \x20   if (first !== undefined) {{\n\
         \x20     out[page] = first - start;\n\
         \x20   }}\n\
         \x20 }}\n\
         \x20 return out;\n\
         }})())"
    );

    let value = page.evaluate_json(&script)?;
    page.close();

    let raw: HashMap<String, f64> = serde_json::from_value(value)
        .map_err(|e| Error::Measure(format!("offset map: {}", e)))?;

    let samples: Vec<(u32, Option<f64>)> = pages
        .iter()
        .map(|page| (*page, raw.get(&page.to_string()).copied()))
        .collect();

    let result = evaluate_samples(&samples, geometry.top_margin_px);
    if result.has_overlap {
        log::warn!(
            "header/content overlap on page {:?}: {:.1}px past the content margin ({} pages sampled)",
            result.worst_page,
            -result.worst_clearance_px,
            result.pages_sampled.len()
        );
    } else {
        log::info!(
            "layout validation clean: worst clearance {:.1}px on page {:?}",
            result.worst_clearance_px,
            result.worst_page
        );
    }
    Ok(result)
}
