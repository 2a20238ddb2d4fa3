//! Built-in block font surface.
//!
//! Glyphs live on a 5x9 grid: rows 0..7 sit above the baseline, rows 7..9
//! below it. Each character advances 6 grid units with half a unit of
//! bearing on both sides, and one em is 8 units, so at pixel size `s` a grid
//! unit is `s / 8` pixels. Lowercase letters reuse the capital shapes and
//! anything without a glyph draws a hollow box. Bold strokes grow by half a
//! unit on each side.
//!
//! The surface needs no system fonts, which makes its output identical on
//! every host.

use crate::rendering::buffer::{RasterBuffer, GLYPH_FILL};
use crate::surface::{RasterSurface, TextMeasure, VerticalExtent};
use crate::{Error, FontSpec, FontWeight, Result};
use log::{debug, trace};

const UNITS_PER_EM: f64 = 8.0;
const ADVANCE: f64 = 6.0;
const BEARING: f64 = 0.5;
const BASELINE_ROW: usize = 7;
const ROWS: usize = 9;
const COLS: usize = 5;

type Glyph = [u8; ROWS];

const BLANK: Glyph = [0; ROWS];

const fn cap(rows: [u8; 7]) -> Glyph {
    [rows[0], rows[1], rows[2], rows[3], rows[4], rows[5], rows[6], 0, 0]
}

const NOTDEF: Glyph = cap([0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111]);

fn glyph(ch: char) -> Glyph {
    if ch.is_whitespace() {
        return BLANK;
    }
    match ch.to_ascii_uppercase() {
        'A' => cap([0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'B' => cap([0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
        'C' => cap([0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
        'D' => cap([0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110]),
        'E' => cap([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        'F' => cap([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        'G' => cap([0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
        'H' => cap([0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'I' => cap([0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'J' => cap([0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
        'K' => cap([0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
        'L' => cap([0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
        'M' => cap([0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
        'N' => cap([0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001]),
        'O' => cap([0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'P' => cap([0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
        'Q' => cap([0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
        'R' => cap([0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
        'S' => cap([0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
        'T' => cap([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
        'U' => cap([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'V' => cap([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
        'W' => cap([0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010]),
        'X' => cap([0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
        'Y' => cap([0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
        'Z' => cap([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
        '0' => cap([0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
        '1' => cap([0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        '2' => cap([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
        '3' => cap([0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
        '4' => cap([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
        '5' => cap([0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
        '6' => cap([0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
        '7' => cap([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
        '8' => cap([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
        '9' => cap([0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
        '.' => cap([0, 0, 0, 0, 0, 0b01100, 0b01100]),
        ',' => [0, 0, 0, 0, 0, 0b01100, 0b01100, 0b00100, 0b01000],
        ';' => [0, 0b01100, 0b01100, 0, 0, 0b01100, 0b01100, 0b00100, 0b01000],
        ':' => cap([0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0]),
        '!' => cap([0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100]),
        '?' => cap([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100]),
        '\'' => cap([0b00100, 0b00100, 0b01000, 0, 0, 0, 0]),
        '"' => cap([0b01010, 0b01010, 0, 0, 0, 0, 0]),
        '-' => cap([0, 0, 0, 0b11111, 0, 0, 0]),
        '+' => cap([0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0]),
        '=' => cap([0, 0, 0b11111, 0, 0b11111, 0, 0]),
        '*' => cap([0, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0]),
        '#' => cap([0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010]),
        '/' => cap([0, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0]),
        '(' => cap([0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010]),
        ')' => cap([0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000]),
        '_' => [0, 0, 0, 0, 0, 0, 0, 0b11111, 0],
        _ => NOTDEF,
    }
}

fn inked(row_bits: u8, col: usize) -> bool {
    row_bits & (1 << (COLS - 1 - col)) != 0
}

/// Topmost and bottommost inked rows over every glyph in `text`.
fn ink_rows(text: &str) -> Option<(usize, usize)> {
    text.chars()
        .map(glyph)
        .flat_map(|g| g.into_iter().enumerate().filter(|(_, bits)| *bits != 0))
        .fold(None, |acc, (row, _)| match acc {
            None => Some((row, row)),
            Some((top, bottom)) => Some((top.min(row), bottom.max(row))),
        })
}

/// Raster surface backed by the built-in block font.
#[derive(Debug, Clone)]
pub struct BitmapSurface {
    font: FontSpec,
    pixel_size: u32,
    buffer: Option<RasterBuffer>,
}

impl BitmapSurface {
    pub fn new() -> Self {
        Self {
            font: FontSpec::default(),
            pixel_size: 1,
            buffer: None,
        }
    }

    fn unit(&self) -> f64 {
        self.pixel_size as f64 / UNITS_PER_EM
    }
}

impl Default for BitmapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for BitmapSurface {
    fn set_font(&mut self, font: &FontSpec, pixel_size: u32) {
        trace!("bitmap surface: {} at {}px", font, pixel_size);
        self.font = font.clone();
        self.pixel_size = pixel_size;
    }

    fn measure_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * ADVANCE * self.unit()
    }

    fn measure_extent(&self, text: &str) -> Option<VerticalExtent> {
        let (top, bottom) = ink_rows(text)?;
        let unit = self.unit();
        Some(VerticalExtent {
            ascent: (BASELINE_ROW as f64 - top as f64) * unit,
            descent: (bottom as f64 + 1.0 - BASELINE_ROW as f64) * unit,
        })
    }
}

impl RasterSurface for BitmapSurface {
    fn create_buffer(&mut self, width: u32, height: u32) -> Result<()> {
        self.buffer = Some(RasterBuffer::try_new(width, height)?);
        Ok(())
    }

    fn draw_text_centered(&mut self, text: &str, font: &FontSpec, pixel_size: u32) -> Result<()> {
        self.set_font(font, pixel_size);
        let unit = self.unit();
        let text_width = self.measure_width(text);
        let rows = ink_rows(text);
        let bold = self.font.weight == FontWeight::Bold;

        let buffer = self
            .buffer
            .as_mut()
            .ok_or_else(|| Error::RenderError("draw called before create_buffer".into()))?;
        let Some((top, bottom)) = rows else {
            return Ok(());
        };

        let left = buffer.width() as f64 / 2.0 - text_width / 2.0;
        let ink_height = (bottom + 1 - top) as f64 * unit;
        let ink_top = buffer.height() as f64 / 2.0 - ink_height / 2.0;
        let embolden = if bold { unit / 2.0 } else { 0.0 };

        let mut clipped = false;
        for (i, ch) in text.chars().enumerate() {
            let g = glyph(ch);
            let origin = left + (i as f64 * ADVANCE + BEARING) * unit;
            for (row, bits) in g.iter().copied().enumerate().filter(|(_, b)| *b != 0) {
                let y0 = ink_top + (row as f64 - top as f64) * unit;
                let y1 = y0 + unit;
                for col in (0..COLS).filter(|&c| inked(bits, c)) {
                    let x0 = origin + col as f64 * unit - embolden;
                    let x1 = origin + (col + 1) as f64 * unit + embolden;
                    clipped |= buffer.fill_rect(
                        x0.round() as i64,
                        y0.round() as i64,
                        x1.round() as i64,
                        y1.round() as i64,
                        GLYPH_FILL,
                    );
                }
            }
        }
        if clipped {
            debug!("bitmap surface: '{}' at {}px was clipped by the buffer", text, pixel_size);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_at(size: u32) -> BitmapSurface {
        let mut s = BitmapSurface::new();
        s.set_font(&FontSpec::default(), size);
        s
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let one = surface_at(1).measure_width("joe");
        let eight = surface_at(8).measure_width("joe");
        assert_eq!(one, 3.0 * 0.75);
        assert_eq!(eight, 18.0);
    }

    #[test]
    fn capitals_sit_on_the_baseline() {
        let e = surface_at(8).measure_extent("A").unwrap();
        assert_eq!(e.ascent, 7.0);
        assert_eq!(e.descent, 0.0);
    }

    #[test]
    fn descenders_extend_below_baseline() {
        let e = surface_at(8).measure_extent("A,").unwrap();
        assert_eq!(e.ascent, 7.0);
        assert_eq!(e.descent, 2.0);
    }

    #[test]
    fn hyphen_extent_is_its_own_ink() {
        let e = surface_at(8).measure_extent("-").unwrap();
        assert_eq!(e.total(), 1.0);
    }

    #[test]
    fn whitespace_has_width_but_no_extent() {
        let s = surface_at(8);
        assert_eq!(s.measure_width("  "), 12.0);
        assert!(s.measure_extent("  \t").is_none());
        assert!(s.measure_extent("").is_none());
    }

    #[test]
    fn unknown_characters_use_the_box_glyph() {
        assert_eq!(glyph('\u{263A}'), NOTDEF);
        assert_eq!(glyph('a'), glyph('A'));
    }

    #[test]
    fn draw_requires_a_buffer() {
        let mut s = BitmapSurface::new();
        let err = s.draw_text_centered("A", &FontSpec::default(), 8).unwrap_err();
        assert!(matches!(err, Error::RenderError(_)));
    }

    #[test]
    fn draw_centers_a_single_glyph() {
        let mut s = BitmapSurface::new();
        s.create_buffer(16, 9).unwrap();
        s.draw_text_centered("I", &FontSpec::regular("Block"), 8).unwrap();
        let buf = s.pixels().unwrap();
        // the stem of 'I' is column 2 of its cell, starting at 8 - 3 + 0.5 + 2
        for y in 1..8 {
            assert!(buf.is_foreground(8, y), "stem missing at y={}", y);
        }
        assert!(!buf.is_foreground(8, 0));
        assert!(!buf.is_foreground(8, 8));
        assert!(!buf.is_foreground(0, 4));
    }

    #[test]
    fn bold_adds_ink() {
        let mut regular = BitmapSurface::new();
        regular.create_buffer(32, 16).unwrap();
        regular.draw_text_centered("L", &FontSpec::regular("Block"), 16).unwrap();
        let mut bold = BitmapSurface::new();
        bold.create_buffer(32, 16).unwrap();
        bold.draw_text_centered("L", &FontSpec::default(), 16).unwrap();
        assert!(bold.pixels().unwrap().ink_count() > regular.pixels().unwrap().ink_count());
    }

    #[test]
    fn whitespace_draws_nothing() {
        let mut s = BitmapSurface::new();
        s.create_buffer(10, 10).unwrap();
        s.draw_text_centered("   ", &FontSpec::default(), 8).unwrap();
        assert_eq!(s.pixels().unwrap().ink_count(), 0);
    }
}
