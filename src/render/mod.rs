//! Browser-driven render passes.
//!
//! One headless Chrome process is acquired per run and scoped so it
//! is released on every exit path. Each pass (measurement, title
//! page, content print, optional validation) gets a fresh tab;
//! residual DOM from a with-TOC render must never leak into a
//! without-TOC measurement.

mod browser;
mod content;
mod html;
mod measure;
mod title;
mod validate;

pub use browser::{BrowserSession, RenderedPage};
pub use content::{print_options, render_content};
pub use html::{build_document_html, build_title_page_html};
pub use measure::{apply_page_numbers, measure_heading_positions};
pub use title::render_title_page;
pub use validate::{evaluate_samples, sample_pages, validate_layout};
