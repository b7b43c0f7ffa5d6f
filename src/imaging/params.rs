//! Parameter types for resize and convert operations.
//!
//! These structs describe *what* to generate, not *how*. They are the
//! interface between the engine (which decides which variants an image needs)
//! and the [`backend`](super::backend) (which produces them and hands back a
//! URL). Keeping them plain data lets tests swap in a recording mock.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`CropMode`]: Crop anchor forwarded to the resizer (`default`, `center`, `top`, ...).
//! - [`WebpParams`]: Quality and force flag for WebP conversion.
//! - [`ResizeParams`]: Full specification of one resize request.

use crate::config::SizeConfig;
use std::fmt;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Where the resizer anchors a crop when both dimensions are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CropMode {
    #[default]
    Default,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopCenter,
    BottomCenter,
}

impl CropMode {
    /// Parse the configuration spelling of a crop mode.
    pub fn parse(value: &str) -> Option<Self> {
        let mode = match value {
            "default" => Self::Default,
            "center" => Self::Center,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "top-center" => Self::TopCenter,
            "bottom-center" => Self::BottomCenter,
            _ => return None,
        };
        Some(mode)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopCenter => "top-center",
            Self::BottomCenter => "bottom-center",
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for converting a generated image to WebP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WebpParams {
    pub quality: Quality,
    /// Regenerate even if a converted file already exists.
    pub force: bool,
}

/// Parameters for one resize request.
///
/// A `width` or `height` of 0 asks the resizer to derive that side from the
/// other one and the source aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source_url: String,
    pub width: u32,
    pub height: u32,
    pub crop: CropMode,
    pub force: bool,
    /// Convert to JPEG first, filling transparency with this colour.
    pub to_jpg: Option<String>,
    /// Letterbox into the exact box instead of cropping, padding with this colour.
    pub letterbox: Option<String>,
}

impl ResizeParams {
    /// Build a request for `source_url` that carries the size's crop, force,
    /// `tojpg` and `letterbox` directives.
    pub fn for_size(size: &SizeConfig, source_url: &str, width: u32, height: u32) -> Self {
        Self {
            source_url: source_url.to_string(),
            width,
            height,
            crop: size.resize.crop,
            force: size.resize.force,
            to_jpg: size.tojpg.clone(),
            letterbox: size.letterbox.clone(),
        }
    }
}
