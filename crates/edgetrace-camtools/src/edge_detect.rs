//! Edge Extraction
//!
//! Turns an RGBA raster into the binary [`EdgeMap`] the tracer walks.
//! Two methods are available: a Sobel gradient threshold summed over all four
//! channels, and a plain brightness test for line-art inputs. An optional
//! sharpen pass runs before either.

use crate::error::{CamToolResult, ParameterError, ParameterResult};
use anyhow::{Context, Result};
use edgetrace_core::EdgeMap;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Sharpen kernel; `filter3x3` divides by its sum (16).
const SHARPEN_KERNEL: [f32; 9] = [-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0];

/// Edge extraction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMethod {
    /// Summed Sobel gradient magnitude
    #[default]
    Sobel,
    /// Pixels whose RGB channels are all brighter than a level
    Brightness,
}

impl fmt::Display for EdgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sobel => write!(f, "sobel"),
            Self::Brightness => write!(f, "brightness"),
        }
    }
}

impl FromStr for EdgeMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sobel" => Ok(Self::Sobel),
            "brightness" | "bright" => Ok(Self::Brightness),
            _ => Err(format!("Unknown edge method: {}", s)),
        }
    }
}

/// Edge extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDetectionSettings {
    /// Extraction method
    pub method: EdgeMethod,
    /// Minimum summed gradient magnitude for a Sobel edge
    pub threshold: f32,
    /// Sharpen the image before extraction
    pub sharpen: bool,
    /// Channel level a brightness edge must exceed (0-255)
    pub brightness_level: u8,
}

impl Default for EdgeDetectionSettings {
    fn default() -> Self {
        Self {
            method: EdgeMethod::Sobel,
            threshold: 128.0,
            sharpen: true,
            brightness_level: 128,
        }
    }
}

impl EdgeDetectionSettings {
    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::require_non_negative("threshold", self.threshold as f64)
    }
}

/// Load an image from disk as 8-bit RGBA.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("Failed to load image file {}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Apply the 3x3 sharpen filter to every channel.
pub fn sharpen(image: &RgbaImage) -> RgbaImage {
    image::imageops::filter3x3(image, &SHARPEN_KERNEL)
}

/// Sobel edge map: a pixel is an edge when the gradient magnitudes of its
/// four channels sum to at least `threshold`.
///
/// Borders are handled by repeating the outermost row and column.
pub fn sobel_edges(image: &RgbaImage, threshold: f32) -> CamToolResult<EdgeMap> {
    let (width, height) = image.dimensions();
    let (w, h) = (width as i64, height as i64);

    let channel = |x: i64, y: i64, c: usize| -> f32 {
        let cx = x.clamp(0, w - 1) as u32;
        let cy = y.clamp(0, h - 1) as u32;
        image.get_pixel(cx, cy).0[c] as f32
    };

    let edges = EdgeMap::from_fn(width as usize, height as usize, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let mut magnitude = 0.0f32;
        for c in 0..4 {
            let p = |dx: i64, dy: i64| channel(x + dx, y + dy, c);
            let gx = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
            let gy = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
            magnitude += gx.hypot(gy);
        }
        magnitude >= threshold
    })?;

    Ok(edges)
}

/// Brightness edge map: a pixel is an edge when its red, green and blue
/// channels are all strictly above `level`.
pub fn bright_pixel_edges(image: &RgbaImage, level: u8) -> CamToolResult<EdgeMap> {
    let (width, height) = image.dimensions();
    let edges = EdgeMap::from_fn(width as usize, height as usize, |x, y| {
        let [r, g, b, _] = image.get_pixel(x as u32, y as u32).0;
        r > level && g > level && b > level
    })?;
    Ok(edges)
}

/// Image to edge map, driven by [`EdgeDetectionSettings`]
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    settings: EdgeDetectionSettings,
}

impl EdgeDetector {
    pub fn new(settings: EdgeDetectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EdgeDetectionSettings {
        &self.settings
    }

    /// Extract edges from an in-memory image.
    pub fn detect(&self, image: &RgbaImage) -> CamToolResult<EdgeMap> {
        self.settings.validate()?;

        let sharpened;
        let source = if self.settings.sharpen {
            sharpened = sharpen(image);
            &sharpened
        } else {
            image
        };

        let edges = match self.settings.method {
            EdgeMethod::Sobel => sobel_edges(source, self.settings.threshold)?,
            EdgeMethod::Brightness => bright_pixel_edges(source, self.settings.brightness_level)?,
        };

        debug!(
            method = %self.settings.method,
            width = edges.width(),
            height = edges.height(),
            edges = edges.count_edges(),
            "edge map extracted"
        );
        Ok(edges)
    }

    /// Load an image file and extract its edges.
    pub fn detect_file<P: AsRef<Path>>(&self, path: P) -> Result<EdgeMap> {
        let image = load_rgba(path)?;
        self.detect(&image).context("Edge extraction failed")
    }
}
