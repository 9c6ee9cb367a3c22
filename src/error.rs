//! Error types for the mdpress library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF generation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Missing or malformed branding configuration. Raised before any
    /// rendering begins; no output file is produced.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A configured asset (logo file) is missing or unreadable.
    #[error("Asset not readable: {0}")]
    MissingAsset(PathBuf),

    /// A brand color could not be parsed.
    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    /// Browser launch or navigation failure.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Print-to-PDF or page rendering failure.
    #[error("Render error: {0}")]
    Render(String),

    /// Heading position measurement failure.
    #[error("Measurement error: {0}")]
    Measure(String),

    /// Error decoding or re-encoding a logo image.
    #[error("Image error: {0}")]
    Image(String),

    /// Error merging or writing the final PDF.
    #[error("PDF assembly error: {0}")]
    PdfAssembly(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfAssembly(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("client name is required".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: client name is required"
        );

        let err = Error::MissingAsset(PathBuf::from("/tmp/logo.png"));
        assert_eq!(err.to_string(), "Asset not readable: /tmp/logo.png");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
