//! Typed rendering options for raster and PDF requests
//!
//! Every option type is a plain value: it is built by the caller, encoded
//! once by [`crate::query`] and then dropped. Numeric fields the service
//! treats as "absent unless given" are `Option`s so that zero stays a real
//! value.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Browser viewport size
///
/// Both dimensions must be set when a window is supplied. The fields are
/// optional so that a half-filled window (e.g. deserialized from JSON) is
/// reported as an error instead of being silently dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Window {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Width and height, or `InvalidDimensions` if either is missing.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        require_pair("window", self.width, self.height)
    }
}

/// Parses `"<width>x<height>"`, e.g. `"1280x720"`.
impl FromStr for Window {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (width, height) = parse_pair(s);
        let window = Window { width, height };
        window.dimensions()?;
        Ok(window)
    }
}

/// Rectangular region of the rendered page to capture
///
/// The offset is independent of the size: `x` and `y` are each emitted
/// when present, but only alongside a complete width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Crop {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl Crop {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            x: None,
            y: None,
        }
    }

    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn dimensions(&self) -> Result<(u32, u32)> {
        require_pair("crop", self.width, self.height)
    }
}

impl FromStr for Crop {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (width, height) = parse_pair(s);
        let crop = Crop {
            width,
            height,
            ..Default::default()
        };
        crop.dimensions()?;
        Ok(crop)
    }
}

/// PDF page margins as CSS lengths (`"10"`, `"55px"`, `"94%"`)
///
/// Empty sides are sent as empty strings; the service applies its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Margin {
    pub fn new(
        top: impl Into<String>,
        right: impl Into<String>,
        bottom: impl Into<String>,
        left: impl Into<String>,
    ) -> Self {
        Self {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }
}

/// Parses `"top;right;bottom;left"`. Missing trailing sides stay empty.
impl FromStr for Margin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut sides = s.split(';').map(|side| side.trim().to_string());
        let margin = Margin {
            top: sides.next().unwrap_or_default(),
            right: sides.next().unwrap_or_default(),
            bottom: sides.next().unwrap_or_default(),
            left: sides.next().unwrap_or_default(),
        };
        if sides.next().is_some() {
            return Err(Error::ConfigError(format!(
                "margin takes at most four sides, got {:?}",
                s
            )));
        }
        Ok(margin)
    }
}

/// Options for PNG and JPEG screenshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Viewport size
    pub window: Option<Window>,
    /// Region to capture
    pub crop: Option<Crop>,
    /// Load condition the service waits for (e.g. `"networkidle0"`)
    pub wait_until: Option<String>,
    /// Headers forwarded verbatim on the outbound request
    pub headers: HashMap<String, String>,
}

/// Raster output kind. JPEG carries its quality, which is always sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg { quality: i32 },
}

/// Options for PDF output
///
/// See the puppeteer `page.pdf()` options for the meaning of each field;
/// the service passes them through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    /// Output path hint for the service (not used locally)
    pub path: String,
    /// Page scale; `None` leaves the service default in place
    pub scale: Option<f32>,
    pub display_header_footer: bool,
    pub print_background: bool,
    pub landscape: bool,
    /// e.g. `"1-5, 8, 11-13"`
    pub page_ranges: String,
    /// Paper format such as `"A4"` or `"Letter"`
    pub format: String,
    pub margin: Margin,
    pub window: Option<Window>,
    pub wait_until: Option<String>,
    pub headers: HashMap<String, String>,
}

fn require_pair(field: &'static str, width: Option<u32>, height: Option<u32>) -> Result<(u32, u32)> {
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(Error::InvalidDimensions {
            field,
            width,
            height,
        }),
    }
}

fn parse_pair(s: &str) -> (Option<u32>, Option<u32>) {
    let mut parts = s.trim().splitn(2, ['x', 'X']);
    let width = parts.next().and_then(|w| w.trim().parse().ok());
    let height = parts.next().and_then(|h| h.trim().parse().ok());
    (width, height)
}
