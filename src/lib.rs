//! textdots
//!
//! Turns a string of text into a sparse point cloud approximating its glyph
//! shapes, for renderers that draw text as a field of dots.
//!
//! # Pipeline
//!
//! - **Fit**: pick the integer font size at which the text spans `scale` of
//!   the target width
//! - **Rasterize**: draw the text into an off-screen buffer whose height is
//!   derived from the text's ink extent
//! - **Sample**: walk the buffer on a regular grid and keep the inked points
//!
//! Every call owns its own buffer and releases it before returning, so
//! concurrent calls never share state.
//!
//! # Example
//!
//! ```
//! use textdots::RenderRequest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = RenderRequest::new("joe thel", 150).with_resolution(3);
//! let cloud = textdots::pixelate(&request)?;
//! assert_eq!(cloud.radius, 3.5);
//! assert!(!cloud.points.is_empty());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod surface;
pub use surface::{RasterSurface, ScopedSurface, TextMeasure, VerticalExtent};

pub mod rendering;

// Built-in block font, always available
pub mod bitmap;

// TrueType/OpenType faces through fontdue
#[cfg(feature = "truetype")]
pub mod truetype;

// Calling layer: resolution selection and the consumer-facing dot config
pub mod dots;

// Async façade for hosts issuing many requests at once
pub mod async_api;

pub use async_api::Pixelator;

/// Default sampling density divisor.
pub const DEFAULT_RESOLUTION: u32 = 3;

/// Default fraction of the target width the text should occupy.
pub const DEFAULT_SCALE: f64 = 0.9;

/// Font weight requested from a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    #[default]
    Bold,
}

/// A font family and weight.
///
/// Surfaces interpret the family name as they see fit: the built-in block
/// font has a single face, the TrueType surface draws with whatever face it
/// was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    #[serde(default)]
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }

    pub fn regular(family: impl Into<String>) -> Self {
        Self::new(family, FontWeight::Normal)
    }

    pub fn bold(family: impl Into<String>) -> Self {
        Self::new(family, FontWeight::Bold)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::bold("Arial")
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            FontWeight::Normal => write!(f, "{}", self.family),
            FontWeight::Bold => write!(f, "bold {}", self.family),
        }
    }
}

fn default_resolution() -> u32 {
    DEFAULT_RESOLUTION
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

/// Parameters for one text-to-points conversion
///
/// # Examples
///
/// ```
/// let req = textdots::RenderRequest::new("hi", 150);
/// assert_eq!(req.resolution, 3);
/// assert_eq!(req.scale, 0.9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Text to convert
    pub text: String,
    /// Canvas width in pixels
    pub target_width: u32,
    /// Sampling density divisor; larger values give sparser clouds
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Fraction of `target_width` the text should span, in (0, 1]; other
    /// values fail with a `MeasurementError`
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Font to draw with
    #[serde(default)]
    pub font: FontSpec,
}

impl RenderRequest {
    pub fn new(text: impl Into<String>, target_width: u32) -> Self {
        Self {
            text: text.into(),
            target_width,
            resolution: DEFAULT_RESOLUTION,
            scale: DEFAULT_SCALE,
            font: FontSpec::default(),
        }
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }
}

/// A sampled grid location whose pixel was inked.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl From<[u32; 2]> for Point {
    fn from([x, y]: [u32; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [u32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// The point cloud produced for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloudConfig {
    /// Inked grid points in row-major scan order
    pub points: Vec<Point>,
    /// Suggested dot radius, half the sampling frequency
    pub radius: f64,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl PointCloudConfig {
    /// Grid step the points were sampled at.
    pub fn frequency(&self) -> u32 {
        (self.radius * 2.0).round() as u32
    }

    /// Upper bound on the number of points for these dimensions.
    pub fn max_points(&self) -> u64 {
        let f = self.frequency().max(1) as u64;
        (self.width as u64).div_ceil(f) * (self.height as u64).div_ceil(f)
    }

    /// SHA-256 over dimensions, radius and points, hex encoded.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.radius.to_bits().to_le_bytes());
        for p in &self.points {
            hasher.update(p.x.to_le_bytes());
            hasher.update(p.y.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Convert text into a point cloud using the supplied surface.
///
/// The surface is cleared before this returns, on success and on failure.
///
/// # Errors
///
/// `MeasurementError` when the text cannot be measured or `scale` lies
/// outside `(0, 1]`. `RenderError` when the fitted text needs a buffer above
/// [`rendering::buffer::MAX_PIXELS`]: very wide targets fit a large font and
/// the height grows with it.
pub fn pixelate_with<S: RasterSurface + ?Sized>(
    surface: &mut S,
    request: &RenderRequest,
) -> Result<PointCloudConfig> {
    let mut surface = ScopedSurface::new(surface);
    let font_size = rendering::fit_font_size(
        &mut *surface,
        &request.text,
        &request.font,
        request.target_width,
        request.scale,
    )?;
    let raster = rendering::rasterize(
        &mut *surface,
        &request.text,
        &request.font,
        font_size,
        request.target_width,
        request.scale,
    )?;

    let freq = rendering::sampling_frequency(request.target_width, request.resolution);
    let points = {
        let buffer = surface
            .pixels()
            .ok_or_else(|| Error::RenderError("surface lost its buffer before sampling".into()))?;
        rendering::sample_points(buffer, freq)
    };
    drop(surface);

    log::debug!(
        "pixelated '{}': {} points at freq {} in {}x{}",
        request.text,
        points.len(),
        freq,
        raster.width,
        raster.height
    );
    Ok(PointCloudConfig {
        points,
        radius: freq as f64 / 2.0,
        width: raster.width,
        height: raster.height,
    })
}

/// Convert text into a point cloud with the built-in block font.
///
/// Fails like [`pixelate_with`]: with a `MeasurementError` for unmeasurable
/// input and a `RenderError` when the buffer would exceed
/// [`rendering::buffer::MAX_PIXELS`].
pub fn pixelate(request: &RenderRequest) -> Result<PointCloudConfig> {
    let mut surface = bitmap::BitmapSurface::new();
    pixelate_with(&mut surface, request)
}

/// Create a surface: a TrueType one when a font file is given, otherwise the
/// built-in block font.
pub fn new_surface(font_path: Option<&Path>) -> Result<Box<dyn RasterSurface + Send>> {
    match font_path {
        None => Ok(Box::new(bitmap::BitmapSurface::new())),
        #[cfg(feature = "truetype")]
        Some(path) => Ok(Box::new(truetype::TrueTypeSurface::from_path(path)?)),
        #[cfg(not(feature = "truetype"))]
        Some(path) => Err(Error::ConfigError(format!(
            "cannot load {}: built without the `truetype` feature",
            path.display()
        ))),
    }
}
