//! Off-screen pixel storage used by the raster surfaces.

use crate::{Error, Result};

/// Packed RGBA value for a fully transparent pixel.
pub const TRANSPARENT: u32 = 0;

/// Pack an RGBA quadruple the way a 32-bit view over RGBA bytes reads it on a
/// little-endian host.
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Opaque black, the default glyph fill.
pub const GLYPH_FILL: u32 = pack_rgba(0, 0, 0, 255);

/// Largest buffer a surface will allocate (256 Mpx, 1 GiB of pixels).
pub const MAX_PIXELS: u64 = 1 << 28;

/// A `width x height` grid of packed RGBA pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl RasterBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; len],
        }
    }

    /// Allocate a buffer, refusing empty or oversized dimensions.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let len = width as u64 * height as u64;
        if len == 0 {
            return Err(Error::RenderError(format!(
                "cannot allocate an empty {}x{} buffer",
                width, height
            )));
        }
        if len > MAX_PIXELS {
            return Err(Error::RenderError(format!(
                "{}x{} buffer exceeds the {} pixel limit",
                width, height, MAX_PIXELS
            )));
        }
        Ok(Self::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major pixel slice.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`; out-of-range coordinates read as background.
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.index(x, y).map_or(TRANSPARENT, |i| self.pixels[i])
    }

    /// Any channel differing from the background counts as foreground.
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.get(x, y) != TRANSPARENT
    }

    /// Fill the half-open pixel rectangle `[x0, x1) x [y0, y1)`, clipped to
    /// the buffer. Returns `true` if anything fell outside.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: u32) -> bool {
        let cx0 = x0.clamp(0, self.width as i64);
        let cx1 = x1.clamp(0, self.width as i64);
        let cy0 = y0.clamp(0, self.height as i64);
        let cy1 = y1.clamp(0, self.height as i64);
        for y in cy0..cy1 {
            let row = y as usize * self.width as usize;
            for x in cx0..cx1 {
                self.pixels[row + x as usize] = color;
            }
        }
        x0 < x1 && y0 < y1 && (cx0 != x0 || cx1 != x1 || cy0 != y0 || cy1 != y1)
    }

    /// Composite a coverage value (0-255) of opaque black over the pixel at
    /// `(x, y)`, keeping the stronger alpha. Returns `false` when clipped.
    pub fn cover(&mut self, x: i64, y: i64, coverage: u8) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let Some(i) = self.index(x as u32, y as u32) else {
            return false;
        };
        if coverage == 0 {
            return true;
        }
        let current = self.pixels[i].to_le_bytes()[3];
        if coverage > current {
            self.pixels[i] = pack_rgba(0, 0, 0, coverage);
        }
        true
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    /// Number of foreground pixels.
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != TRANSPARENT).count()
    }
}
