//! Branding configuration: client identity, company contact block,
//! logo paths, and brand colors.
//!
//! A [`BrandingConfig`] is immutable for one generation run. It is
//! loaded from a JSON file, optionally overridden field-by-field from
//! CLI flags, and validated up front so that configuration problems
//! fail before any browser work starts.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// An RGB brand color, parsed from `#rgb` or `#rrggbb` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parse a CSS hex color (`#1f3a5f` or `#abc`).
    pub fn parse(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        let expand = |c: u8| (c << 4) | c;
        match hex.len() {
            3 => {
                let v = u32::from_str_radix(hex, 16)
                    .map_err(|_| Error::InvalidColor(s.to_string()))?;
                Ok(Self {
                    r: expand(((v >> 8) & 0xf) as u8),
                    g: expand(((v >> 4) & 0xf) as u8),
                    b: expand((v & 0xf) as u8),
                })
            }
            6 => {
                let v = u32::from_str_radix(hex, 16)
                    .map_err(|_| Error::InvalidColor(s.to_string()))?;
                Ok(Self {
                    r: ((v >> 16) & 0xff) as u8,
                    g: ((v >> 8) & 0xff) as u8,
                    b: (v & 0xff) as u8,
                })
            }
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }

    /// CSS `#rrggbb` representation.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend toward white. `amount` is in `0.0..=1.0`; `0.0` is the
    /// original color, `1.0` is white. Used for the total-row
    /// background derived from the table header color.
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let blend = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round() as u8;
        Self {
            r: blend(self.r),
            g: blend(self.g),
            b: blend(self.b),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_css()
    }
}

/// The four brand colors used across the generated document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BrandColors {
    /// Primary brand color (title page accents, heading text).
    pub primary: Color,

    /// Secondary brand color (subtitles, TOC leaders).
    pub secondary: Color,

    /// Table header row background.
    pub table_header: Color,

    /// Alternating table row background.
    pub table_row_alt: Color,
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            primary: Color { r: 0x1f, g: 0x3a, b: 0x5f },
            secondary: Color { r: 0x4a, g: 0x6f, b: 0xa5 },
            table_header: Color { r: 0x1f, g: 0x3a, b: 0x5f },
            table_row_alt: Color { r: 0xf0, g: 0xf4, b: 0xf8 },
        }
    }
}

/// Company contact block shown on the title page and in the footer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyContact {
    /// Company name.
    pub name: String,

    /// Company website.
    pub website: String,

    /// Contact email.
    pub email: String,

    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Branding configuration for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    /// Client name shown on the title page and repeating header.
    pub client_name: String,

    /// Company contact block.
    pub company: CompanyContact,

    /// Logo used on the title page.
    pub title_logo: PathBuf,

    /// Smaller logo used in the repeating page header.
    pub header_logo: PathBuf,

    /// Brand colors.
    #[serde(default)]
    pub colors: BrandColors,

    /// Explicit document title. When absent, the first top-level
    /// heading of the markdown source is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_override: Option<String>,

    /// Run the optional post-render layout validator.
    #[serde(default)]
    pub validate_layout: bool,
}

impl BrandingConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    /// Set the client name.
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Set an explicit document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_override = Some(title.into());
        self
    }

    /// Set the title-page logo path.
    pub fn with_title_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.title_logo = path.into();
        self
    }

    /// Set the header logo path.
    pub fn with_header_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.header_logo = path.into();
        self
    }

    /// Enable or disable the layout validator.
    pub fn with_layout_validation(mut self, enabled: bool) -> Self {
        self.validate_layout = enabled;
        self
    }

    /// Fail-fast validation of required fields and logo readability.
    ///
    /// Called before any rendering begins; a failure here means no
    /// output file is produced.
    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(Error::Config("client name is required".into()));
        }
        if self.company.name.trim().is_empty() {
            return Err(Error::Config("company name is required".into()));
        }
        if self.company.website.trim().is_empty() {
            return Err(Error::Config("company website is required".into()));
        }
        if self.company.email.trim().is_empty() {
            return Err(Error::Config("company email is required".into()));
        }
        crate::assets::check_readable(&self.title_logo)?;
        crate::assets::check_readable(&self.header_logo)?;
        Ok(())
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            company: CompanyContact::default(),
            title_logo: PathBuf::new(),
            header_logo: PathBuf::new(),
            colors: BrandColors::default(),
            title_override: None,
            validate_layout: false,
        }
    }
}
