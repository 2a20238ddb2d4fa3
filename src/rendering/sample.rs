//! Grid sampling of a rasterized buffer.

use crate::rendering::buffer::RasterBuffer;
use crate::Point;

/// Grid step for a `target_width` wide canvas sampled at `resolution`:
/// `floor(sqrt(target_width / resolution))`, never below 1.
///
/// A resolution of 0 is treated as 1.
pub fn sampling_frequency(target_width: u32, resolution: u32) -> u32 {
    let ratio = target_width as f64 / resolution.max(1) as f64;
    let freq = ratio.sqrt().floor();
    if freq >= 1.0 {
        freq as u32
    } else {
        1
    }
}

/// Foreground pixels on the `freq`-spaced grid starting at the origin, in
/// row-major order.
pub fn sample_points(buffer: &RasterBuffer, freq: u32) -> Vec<Point> {
    let step = freq.max(1) as usize;
    let mut points = Vec::new();
    for y in (0..buffer.height()).step_by(step) {
        for x in (0..buffer.width()).step_by(step) {
            if buffer.is_foreground(x, y) {
                points.push(Point { x, y });
            }
        }
    }
    points
}
