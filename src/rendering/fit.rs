//! Font size fitting by direct ratio.

use crate::surface::TextMeasure;
use crate::{Error, FontSpec, Result};
use log::trace;

/// Size the reference measurement is taken at.
pub const REFERENCE_SIZE: u32 = 1;

/// Pick the integer font size at which `text` spans `target_width * scale`
/// pixels, assuming advance width grows linearly with size.
///
/// Text with no measurable width (empty, or a face without advances) is a
/// measurement failure, and so is a scale outside `(0, 1]`: text wider than
/// the canvas would only be clipped away.
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    font: &FontSpec,
    target_width: u32,
    scale: f64,
) -> Result<u32> {
    if !(scale > 0.0 && scale <= 1.0) {
        return Err(Error::MeasurementError(format!(
            "scale must be in (0, 1], got {}",
            scale
        )));
    }

    measure.set_font(font, REFERENCE_SIZE);
    let reference_width = measure.measure_width(text);
    if !(reference_width.is_finite() && reference_width > 0.0) {
        return Err(Error::MeasurementError(format!(
            "'{}' has no measurable width at {}px",
            text, REFERENCE_SIZE
        )));
    }

    let ratio = (target_width as f64 * scale / reference_width).floor();
    if !ratio.is_finite() || ratio < 0.0 || ratio > u32::MAX as f64 {
        return Err(Error::MeasurementError(format!(
            "cannot fit '{}' to {}px at scale {}",
            text, target_width, scale
        )));
    }

    trace!(
        "fit '{}': reference width {} -> {}px",
        text,
        reference_width,
        ratio
    );
    Ok(ratio as u32)
}
