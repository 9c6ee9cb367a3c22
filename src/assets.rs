//! Logo assets: readability checks, compression, and data-URI
//! embedding.
//!
//! Logos are re-encoded once per run into temporary PNG copies sized
//! for their slot (large for the title page, small for the repeating
//! header). Chrome's header/footer templates cannot load `file://`
//! resources, so logos are embedded as base64 data URIs.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::imageops::FilterType;
use image::ImageFormat;
use std::fs::{self, File};
use std::path::Path;
use tempfile::NamedTempFile;

/// Maximum pixel width of the compressed title-page logo.
pub const TITLE_LOGO_MAX_WIDTH: u32 = 600;

/// Maximum pixel width of the compressed header logo.
pub const HEADER_LOGO_MAX_WIDTH: u32 = 120;

/// Verify that an asset path exists and is readable.
///
/// Configuration errors of this class must surface before any browser
/// work starts.
pub fn check_readable(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::Config("logo path is required".into()));
    }
    File::open(path).map_err(|_| Error::MissingAsset(path.to_path_buf()))?;
    Ok(())
}

/// Decode a logo, downscale it if wider than `max_width`, and write a
/// PNG copy to a temp file. The returned handle deletes the copy on
/// drop, which covers both the happy-path cleanup and early aborts.
pub fn compress_logo(path: &Path, max_width: u32) -> Result<NamedTempFile> {
    check_readable(path)?;
    let img = image::open(path)?;

    let img = if img.width() > max_width {
        log::debug!(
            "downscaling logo {} from {}px to {}px wide",
            path.display(),
            img.width(),
            max_width
        );
        img.resize(max_width, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };

    let file = tempfile::Builder::new()
        .prefix("mdpress-logo-")
        .suffix(".png")
        .tempfile()?;
    img.save_with_format(file.path(), ImageFormat::Png)?;
    Ok(file)
}

/// Read an image file and embed it as a base64 data URI.
pub fn data_uri(path: &Path) -> Result<String> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| Error::Image(format!("unknown image format: {}", path.display())))?;
    let mime = match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        other => {
            return Err(Error::Image(format!(
                "unsupported logo format {:?}: {}",
                other,
                path.display()
            )))
        }
    };
    let bytes = fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
