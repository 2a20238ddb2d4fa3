//! Text measurement and rasterization capabilities.
//!
//! The pipeline never talks to a font library directly. It goes through
//! `TextMeasure` to size the text and through `RasterSurface` to draw it into
//! an off-screen buffer and read the pixels back. Any font/graphics stack can
//! back these traits; this crate ships a built-in block font
//! (`crate::bitmap`) and a TrueType one (`crate::truetype`).

use crate::rendering::buffer::RasterBuffer;
use crate::{FontSpec, Result};
use std::ops::{Deref, DerefMut};

/// Ink extent of a string above and below its baseline, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalExtent {
    pub ascent: f64,
    pub descent: f64,
}

impl VerticalExtent {
    pub fn total(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Measures text with a selected font at an integer pixel size.
pub trait TextMeasure {
    /// Select the font family/weight and pixel size for subsequent calls.
    fn set_font(&mut self, font: &FontSpec, pixel_size: u32);

    /// Advance width of `text` at the current size.
    fn measure_width(&self, text: &str) -> f64;

    /// Actual ink extent of `text` at the current size, or `None` when the
    /// text has nothing to measure (empty or whitespace-only).
    fn measure_extent(&self, text: &str) -> Option<VerticalExtent>;
}

/// An off-screen drawing target.
///
/// A surface owns at most one buffer at a time. `clear` discards it, after
/// which `pixels` returns `None` until the next `create_buffer`.
pub trait RasterSurface: TextMeasure {
    /// Allocate a fresh transparent buffer, replacing any previous one.
    fn create_buffer(&mut self, width: u32, height: u32) -> Result<()>;

    /// Draw `text` centered on the buffer: the advance box horizontally on
    /// `width / 2`, the ink box vertically on `height / 2`.
    fn draw_text_centered(&mut self, text: &str, font: &FontSpec, pixel_size: u32) -> Result<()>;

    /// Read back the current buffer.
    fn pixels(&self) -> Option<&RasterBuffer>;

    /// Discard the current buffer.
    fn clear(&mut self);
}

impl<S: TextMeasure + ?Sized> TextMeasure for Box<S> {
    fn set_font(&mut self, font: &FontSpec, pixel_size: u32) {
        (**self).set_font(font, pixel_size)
    }

    fn measure_width(&self, text: &str) -> f64 {
        (**self).measure_width(text)
    }

    fn measure_extent(&self, text: &str) -> Option<VerticalExtent> {
        (**self).measure_extent(text)
    }
}

impl<S: RasterSurface + ?Sized> RasterSurface for Box<S> {
    fn create_buffer(&mut self, width: u32, height: u32) -> Result<()> {
        (**self).create_buffer(width, height)
    }

    fn draw_text_centered(&mut self, text: &str, font: &FontSpec, pixel_size: u32) -> Result<()> {
        (**self).draw_text_centered(text, font, pixel_size)
    }

    fn pixels(&self) -> Option<&RasterBuffer> {
        (**self).pixels()
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

/// Borrows a surface for the duration of one request and clears it when
/// dropped, whether the request succeeded or not.
pub struct ScopedSurface<'a, S: RasterSurface + ?Sized> {
    inner: &'a mut S,
}

impl<'a, S: RasterSurface + ?Sized> ScopedSurface<'a, S> {
    pub fn new(inner: &'a mut S) -> Self {
        Self { inner }
    }
}

impl<S: RasterSurface + ?Sized> Deref for ScopedSurface<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.inner
    }
}

impl<S: RasterSurface + ?Sized> DerefMut for ScopedSurface<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.inner
    }
}

impl<S: RasterSurface + ?Sized> Drop for ScopedSurface<'_, S> {
    fn drop(&mut self) {
        self.inner.clear();
    }
}
