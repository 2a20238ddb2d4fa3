//! TrueType/OpenType surface backed by `fontdue`.
//!
//! The face is fixed when the surface is built; `FontSpec` only labels it.
//! Pick a bold font file to get bold output.

use crate::rendering::buffer::RasterBuffer;
use crate::surface::{RasterSurface, TextMeasure, VerticalExtent};
use crate::{Error, FontSpec, Result};
use fontdue::{Font, FontSettings};
use log::{debug, trace};
use std::path::Path;

/// Raster surface drawing with a loaded font face
pub struct TrueTypeSurface {
    face: Font,
    font: FontSpec,
    pixel_size: u32,
    buffer: Option<RasterBuffer>,
}

impl TrueTypeSurface {
    /// Parse a face from raw TTF/OTF bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let face = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::FontError(e.to_string()))?;
        Ok(Self {
            face,
            font: FontSpec::default(),
            pixel_size: 1,
            buffer: None,
        })
    }

    /// Read and parse a face from a font file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::FontError(format!("{}: {}", path.display(), e)))?;
        debug!("loaded font face from {}", path.display());
        Self::from_bytes(&bytes)
    }

    fn px(&self) -> f32 {
        self.pixel_size as f32
    }

    /// Pen advance for each character, kerning included.
    fn advances(&self, text: &str) -> Vec<f64> {
        let px = self.px();
        let chars: Vec<char> = text.chars().collect();
        chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                let advance = self.face.metrics(ch, px).advance_width;
                let kern = chars
                    .get(i + 1)
                    .and_then(|&next| self.face.horizontal_kern(ch, next, px))
                    .unwrap_or(0.0);
                (advance + kern) as f64
            })
            .collect()
    }
}

impl TextMeasure for TrueTypeSurface {
    fn set_font(&mut self, font: &FontSpec, pixel_size: u32) {
        trace!("truetype surface: {} at {}px", font, pixel_size);
        self.font = font.clone();
        self.pixel_size = pixel_size;
    }

    fn measure_width(&self, text: &str) -> f64 {
        self.advances(text).iter().sum()
    }

    fn measure_extent(&self, text: &str) -> Option<VerticalExtent> {
        let px = self.px();
        let (top, bottom) = text
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| self.face.metrics(ch, px))
            .filter(|m| m.width > 0 && m.height > 0)
            .fold(None, |acc: Option<(i32, i32)>, m| {
                let top = m.ymin + m.height as i32;
                Some(match acc {
                    None => (top, m.ymin),
                    Some((t, b)) => (t.max(top), b.min(m.ymin)),
                })
            })?;
        Some(VerticalExtent {
            ascent: top as f64,
            descent: -(bottom as f64),
        })
    }
}

impl RasterSurface for TrueTypeSurface {
    fn create_buffer(&mut self, width: u32, height: u32) -> Result<()> {
        self.buffer = Some(RasterBuffer::try_new(width, height)?);
        Ok(())
    }

    fn draw_text_centered(&mut self, text: &str, font: &FontSpec, pixel_size: u32) -> Result<()> {
        self.set_font(font, pixel_size);
        let px = self.px();
        let advances = self.advances(text);
        let text_width: f64 = advances.iter().sum();
        let extent = self.measure_extent(text);

        let buffer = self
            .buffer
            .as_mut()
            .ok_or_else(|| Error::RenderError("draw called before create_buffer".into()))?;
        let Some(extent) = extent else {
            return Ok(());
        };

        let ink_top = buffer.height() as f64 / 2.0 - extent.total() / 2.0;
        let baseline = (ink_top + extent.ascent).round() as i64;
        let mut pen = buffer.width() as f64 / 2.0 - text_width / 2.0;

        let mut clipped = false;
        for (ch, advance) in text.chars().zip(advances) {
            if !ch.is_whitespace() {
                let (m, coverage) = self.face.rasterize(ch, px);
                let gx = (pen + m.xmin as f64).round() as i64;
                let gy = baseline - (m.ymin as i64 + m.height as i64);
                for (row, line) in coverage.chunks(m.width.max(1)).enumerate() {
                    for (col, &c) in line.iter().enumerate() {
                        if !buffer.cover(gx + col as i64, gy + row as i64, c) && c > 0 {
                            clipped = true;
                        }
                    }
                }
            }
            pen += advance;
        }
        if clipped {
            debug!("truetype surface: '{}' at {}px was clipped by the buffer", text, pixel_size);
        }
        Ok(())
    }

    fn pixels(&self) -> Option<&RasterBuffer> {
        self.buffer.as_ref()
    }

    fn clear(&mut self) {
        self.buffer = None;
    }
}
