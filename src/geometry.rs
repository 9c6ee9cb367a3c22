//! Page geometry: the single source of truth for paper size, print
//! margins, and front-matter offsets.
//!
//! Both the page-number mapper and the print-to-PDF call derive their
//! constants from one [`PageGeometry`] value. Keeping them in one
//! place matters more than it looks: a drift between the height the
//! mapper divides by and the margins the browser actually prints with
//! silently corrupts every TOC page number without any error.
//!
//! All stored values are CSS pixels at 96 dpi. The print call needs
//! inches, so the conversion happens here and nowhere else.

/// CSS reference pixel density used by the browser.
pub const PX_PER_INCH: f64 = 96.0;

/// Paper size, print margins, and front-matter page count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Paper width in CSS pixels.
    pub paper_width_px: f64,

    /// Paper height in CSS pixels.
    pub paper_height_px: f64,

    /// Top print margin in CSS pixels. Also the minimum offset the
    /// layout validator requires before the first content element.
    pub top_margin_px: f64,

    /// Bottom print margin in CSS pixels.
    pub bottom_margin_px: f64,

    /// Left/right print margin in CSS pixels.
    pub side_margin_px: f64,

    /// 1-based page number of the first content page: the title page,
    /// the TOC page, and the 1-based origin folded into one constant,
    /// matching the mapper formula below.
    pub front_matter_pages: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4 at 96 dpi with a 1in top margin (header zone), 0.8in
        // bottom margin (footer zone), 0.75in sides.
        Self {
            paper_width_px: 794.0,
            paper_height_px: 1123.0,
            top_margin_px: 96.0,
            bottom_margin_px: 76.8,
            side_margin_px: 72.0,
            front_matter_pages: 3,
        }
    }
}

impl PageGeometry {
    /// Printable height after subtracting top and bottom margins.
    pub fn usable_height_px(&self) -> f64 {
        self.paper_height_px - self.top_margin_px - self.bottom_margin_px
    }

    /// Content width after subtracting side margins. The measurement
    /// viewport must use this width so that measured line wraps match
    /// the printed layout.
    pub fn content_width_px(&self) -> f64 {
        self.paper_width_px - 2.0 * self.side_margin_px
    }

    /// Map an absolute document-flow Y offset (CSS pixels, measured in
    /// the no-TOC render) to the final printed page number.
    ///
    /// Monotonic non-decreasing in `y`. `front_matter_pages` accounts
    /// for the title page and the always-page-break-forced TOC page
    /// that precede content in the final document.
    pub fn page_number(&self, y: f64) -> u32 {
        let y = y.max(0.0);
        (y / self.usable_height_px()).floor() as u32 + self.front_matter_pages
    }

    /// Estimated page count for a document of the given scroll height.
    pub fn estimate_page_count(&self, scroll_height_px: f64) -> u32 {
        (scroll_height_px / self.usable_height_px()).ceil().max(1.0) as u32
    }

    /// Paper size in inches, as the print call expects.
    pub fn paper_size_in(&self) -> (f64, f64) {
        (
            self.paper_width_px / PX_PER_INCH,
            self.paper_height_px / PX_PER_INCH,
        )
    }

    /// Print margins in inches: (top, bottom, left, right).
    pub fn margins_in(&self) -> (f64, f64, f64, f64) {
        (
            self.top_margin_px / PX_PER_INCH,
            self.bottom_margin_px / PX_PER_INCH,
            self.side_margin_px / PX_PER_INCH,
            self.side_margin_px / PX_PER_INCH,
        )
    }
}
