//! The text-to-points pipeline stages.
//!
//! `fit` picks a font size, `raster` draws the text into a surface buffer
//! sized to its ink, and `sample` walks that buffer on a regular grid.

pub mod buffer;
pub mod fit;
pub mod raster;
pub mod sample;

pub use buffer::RasterBuffer;
pub use fit::fit_font_size;
pub use raster::{rasterize, Rasterized};
pub use sample::{sample_points, sampling_frequency};
