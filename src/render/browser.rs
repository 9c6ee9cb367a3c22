//! Scoped headless-Chrome session.
//!
//! The session owns the browser process for the whole run. Dropping
//! it closes the process, which is what guarantees release on every
//! exit path, including error returns mid-pipeline. Pages are opened
//! on fresh tabs; tab state is never reused across passes.

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Per-tab default timeout. A hang inside browser rendering hangs the
/// run; there is no caller-facing cancellation surface for this batch
/// tool, but a generous cap keeps a dead browser from hanging forever.
const TAB_TIMEOUT: Duration = Duration::from_secs(120);

/// A headless browser acquired for one generation run.
pub struct BrowserSession {
    browser: Browser,
}

impl BrowserSession {
    /// Launch headless Chrome with a viewport matching the print
    /// content width, so measured line wraps agree with the printed
    /// layout.
    pub fn launch(geometry: &PageGeometry) -> Result<Self> {
        let window = (
            geometry.content_width_px().round() as u32,
            geometry.paper_height_px.round() as u32,
        );
        let options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some(window))
            .build()
            .map_err(|e| Error::Browser(format!("launch options: {}", e)))?;

        let browser =
            Browser::new(options).map_err(|e| Error::Browser(format!("launch failed: {}", e)))?;
        log::info!(
            "launched headless browser with {}x{} viewport",
            window.0,
            window.1
        );
        Ok(Self { browser })
    }

    /// Load an HTML document in a fresh tab. The HTML is written to a
    /// temp file and navigated via `file://`; the file lives as long
    /// as the returned page.
    pub fn open_html(&self, html: &str) -> Result<RenderedPage> {
        let mut source = tempfile::Builder::new()
            .prefix("mdpress-page-")
            .suffix(".html")
            .tempfile()?;
        source.write_all(html.as_bytes())?;
        source.flush()?;

        let tab = self
            .browser
            .new_tab()
            .map_err(|e| Error::Browser(format!("new tab: {}", e)))?;
        tab.set_default_timeout(TAB_TIMEOUT);

        let url = format!("file://{}", source.path().display());
        tab.navigate_to(&url)
            .map_err(|e| Error::Browser(format!("navigate: {}", e)))?;
        tab.wait_until_navigated()
            .map_err(|e| Error::Browser(format!("navigation wait: {}", e)))?;

        Ok(RenderedPage {
            tab,
            _source: source,
        })
    }
}

/// A loaded document in its own tab.
pub struct RenderedPage {
    tab: Arc<Tab>,
    _source: NamedTempFile,
}

impl RenderedPage {
    /// Evaluate a JavaScript expression that yields a JSON string
    /// (callers wrap their script in `JSON.stringify(...)`) and parse
    /// the result.
    pub fn evaluate_json(&self, expression: &str) -> Result<serde_json::Value> {
        let remote = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| Error::Measure(format!("evaluate: {}", e)))?;

        match remote.value {
            Some(serde_json::Value::String(raw)) => serde_json::from_str(&raw)
                .map_err(|e| Error::Measure(format!("malformed result: {}", e))),
            Some(other) => Ok(other),
            None => Err(Error::Measure("script returned no value".into())),
        }
    }

    /// Print the page to PDF bytes.
    pub fn print_to_pdf(&self, options: PrintToPdfOptions) -> Result<Vec<u8>> {
        self.tab
            .print_to_pdf(Some(options))
            .map_err(|e| Error::Render(format!("print to PDF: {}", e)))
    }

    /// Close the tab early. Errors are ignored; the browser process
    /// itself is torn down when the session drops.
    pub fn close(self) {
        let _ = self.tab.close(true);
    }
}
