//! Error types for the text-to-dots pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning text into a point cloud
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The text could not be measured, or its measurements do not yield a
    /// finite positive buffer height. This is the only failure `pixelate`
    /// itself reports.
    #[error("Measurement failed: {0}")]
    MeasurementError(String),

    /// Failed to load a font face
    #[error("Font loading failed: {0}")]
    FontError(String),

    /// The rasterization surface was used out of order or could not allocate
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error came from measuring the text.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Error::MeasurementError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_errors_are_tagged() {
        let e = Error::MeasurementError("unable to calculate height".into());
        assert!(e.is_measurement());
        assert_eq!(e.to_string(), "Measurement failed: unable to calculate height");
        assert!(!Error::FontError("bad".into()).is_measurement());
    }
}
