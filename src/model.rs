//! Data model shared across pipeline stages.
//!
//! All entities are created fresh per invocation and discarded after
//! the run. Headings are owned by the transform stage, enriched with
//! page numbers by the mapper, and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A heading discovered during the transform stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    /// Stable document-order id (`heading-1`, `heading-2`, ...).
    /// Identical between the measurement-pass HTML and the
    /// render-pass HTML.
    pub id: String,

    /// Heading level, 1-6.
    pub level: u8,

    /// Plain heading text with HTML entities decoded.
    pub text: String,

    /// Final printed page number, filled in by the mapper. `None`
    /// when the measurement pass could not locate the heading.
    pub page_number: Option<u32>,
}

impl Heading {
    /// Whether this heading appears in the table of contents.
    /// TOC entries are levels 1-2 that received a page number.
    pub fn in_toc(&self) -> bool {
        self.level <= 2 && self.page_number.is_some()
    }
}

/// Result of the position measurement pass.
#[derive(Debug, Clone, Default)]
pub struct MeasurementResult {
    /// Absolute document-flow Y offset (CSS pixels) per heading id.
    pub offsets: HashMap<String, f64>,

    /// Number of headings successfully measured.
    pub measured: usize,

    /// Total number of headings queried.
    pub total: usize,
}

impl MeasurementResult {
    /// Fraction of headings that were located, in `0.0..=1.0`.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.measured as f64 / self.total as f64
        }
    }
}

/// Result of the optional layout validation pass. Advisory only: it
/// is logged and reported but never blocks output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether any sampled page's first content element begins inside
    /// the header zone.
    pub has_overlap: bool,

    /// The sampled page with the smallest clearance, when any page
    /// had measurable content.
    pub worst_page: Option<u32>,

    /// Smallest observed clearance in CSS pixels. Negative values are
    /// overlap amounts.
    pub worst_clearance_px: f64,

    /// Pages that were sampled.
    pub pages_sampled: Vec<u32>,
}

/// Summary of a completed generation run, reported on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Path of the merged output PDF.
    pub output_path: PathBuf,

    /// Page count read back from the merged file.
    pub page_count: u32,

    /// Byte size read back from the merged file.
    pub file_size: u64,

    /// Total headings found in the document.
    pub headings_total: usize,

    /// Headings that received a page number.
    pub headings_measured: usize,

    /// Entries emitted into the TOC.
    pub toc_entries: usize,

    /// Layout validation outcome, when the validator ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
}

impl GenerationSummary {
    /// Fraction of headings that received a page number.
    pub fn heading_coverage(&self) -> f64 {
        if self.headings_total == 0 {
            1.0
        } else {
            self.headings_measured as f64 / self.headings_total as f64
        }
    }
}
