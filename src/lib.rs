//! mdpress turns a markdown document into a branded, print-ready PDF.
//!
//! The generated document carries a title page, a table of contents
//! with real page numbers, styled tables, a repeating header with the
//! client name and logo, and a footer with company contact details
//! and page numbers.
//!
//! Accurate TOC page numbers come from a two-pass render: the content
//! is first laid out in a headless browser without the TOC, each
//! heading's vertical position is measured and mapped to a printed
//! page number, and only then is the document rendered again with the
//! populated TOC. Title page and content are produced as separate
//! PDFs and merged into the final output.
//!
//! # Quick start
//!
//! ```no_run
//! use mdpress::{BrandingConfig, GenerateOptions, Pipeline};
//!
//! fn main() -> mdpress::Result<()> {
//!     let branding = BrandingConfig::from_json_file("branding.json")?;
//!     let options = GenerateOptions::new("report.md", branding)
//!         .with_output("report.pdf");
//!     let summary = Pipeline::new(options).run()?;
//!     println!("wrote {} ({} pages)", summary.output_path.display(), summary.page_count);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - Markdown to HTML conversion with table, strikethrough and task
//!   list support
//! - Pipe-table beautification: styled headers, alternating rows,
//!   right-aligned numeric columns, highlighted total rows
//! - Two-pass page-number measurement for the table of contents
//! - Logo compression and inlining for title page and header
//! - Optional post-render check for header/content overlap
//! - PDF merge of title and content documents
//!
//! A local Chrome or Chromium installation is required at runtime.

pub mod assemble;
pub mod assets;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod transform;

pub use assemble::AssembledPdf;
pub use config::{BrandColors, BrandingConfig, Color, CompanyContact};
pub use error::{Error, Result};
pub use geometry::PageGeometry;
pub use model::{GenerationSummary, Heading, MeasurementResult, ValidationResult};
pub use pipeline::{GenerateOptions, Pipeline, Stage};
pub use transform::{transform, TransformedDocument};

/// Generate a PDF from a markdown file with default geometry.
///
/// Convenience wrapper over [`Pipeline`] for callers that do not need
/// stage observation or custom page geometry.
pub fn generate_file(
    input: impl Into<std::path::PathBuf>,
    output: impl Into<std::path::PathBuf>,
    branding: BrandingConfig,
) -> Result<GenerationSummary> {
    let options = GenerateOptions::new(input, branding).with_output(output);
    Pipeline::new(options).run()
}
