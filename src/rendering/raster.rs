//! Draw fitted text into a surface buffer sized to the text's ink.

use crate::surface::RasterSurface;
use crate::{Error, FontSpec, Result};
use log::debug;

/// Dimensions of the buffer a rasterization produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rasterized {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
}

/// Buffer height for an ink box of `ink_height` pixels at `scale`.
///
/// Fails unless `ceil(ink_height / scale)` is a finite positive integer.
pub fn buffer_height(ink_height: f64, scale: f64) -> Result<u32> {
    let height = (ink_height / scale).ceil();
    if !height.is_finite() || height < 1.0 || height > u32::MAX as f64 {
        return Err(Error::MeasurementError(format!(
            "unable to calculate height from ink height {} at scale {}",
            ink_height, scale
        )));
    }
    Ok(height as u32)
}

/// Measure `text` at `font_size`, allocate a `target_width` wide buffer on
/// the surface and draw the text centered into it.
///
/// Nothing is allocated when the measurement fails.
pub fn rasterize<S: RasterSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    font: &FontSpec,
    font_size: u32,
    target_width: u32,
    scale: f64,
) -> Result<Rasterized> {
    surface.set_font(font, font_size);
    let extent = surface.measure_extent(text).ok_or_else(|| {
        Error::MeasurementError(format!("'{}' has no ink to measure at {}px", text, font_size))
    })?;
    let height = buffer_height(extent.total(), scale)?;

    surface.create_buffer(target_width, height)?;
    surface.draw_text_centered(text, font, font_size)?;
    debug!(
        "rasterized '{}' at {}px into {}x{}",
        text, font_size, target_width, height
    );
    Ok(Rasterized {
        width: target_width,
        height,
        font_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::BitmapSurface;

    #[test]
    fn height_is_ink_over_scale_rounded_up() {
        assert_eq!(buffer_height(157.5, 0.9).unwrap(), 175);
        assert_eq!(buffer_height(7.0, 1.0).unwrap(), 7);
    }

    #[test]
    fn degenerate_heights_fail() {
        assert!(buffer_height(0.0, 0.9).is_err());
        assert!(buffer_height(0.0, 0.0).is_err());
        assert!(buffer_height(5.0, 0.0).is_err());
        assert!(buffer_height(f64::NAN, 0.9).is_err());
        assert!(buffer_height(-3.0, 0.9).is_err());
    }

    #[test]
    fn whitespace_fails_before_allocation() {
        let mut s = BitmapSurface::new();
        let err = rasterize(&mut s, "   ", &FontSpec::default(), 40, 150, 0.9).unwrap_err();
        assert!(err.is_measurement());
        assert!(s.pixels().is_none());
    }

    #[test]
    fn buffer_is_target_width_wide() {
        let mut s = BitmapSurface::new();
        let r = rasterize(&mut s, "A", &FontSpec::default(), 180, 150, 0.9).unwrap();
        assert_eq!(r, Rasterized { width: 150, height: 175, font_size: 180 });
        let buf = s.pixels().unwrap();
        assert_eq!((buf.width(), buf.height()), (150, 175));
        assert!(buf.ink_count() > 0);
    }
}
