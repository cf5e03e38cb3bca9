use thiserror::Error;

/// Failures that violate a pipeline precondition.
///
/// Expected outcomes (no contours, a non-quadrilateral corner count) are not
/// errors; they flow through as ordinary results.
#[derive(Error, Debug)]
pub enum DetectError {
    /// The input image has no pixels.
    #[error("degenerate image: {width}x{height} has zero area")]
    DegenerateImage {
        /// Image width in pixels
        width: usize,
        /// Image height in pixels
        height: usize,
    },

    /// The declared dimensions cannot be addressed.
    #[error("image too large: {width}x{height}")]
    ImageTooLarge {
        /// Declared width in pixels
        width: usize,
        /// Declared height in pixels
        height: usize,
    },

    /// The pixel buffer does not match the declared dimensions and format.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Bytes required by width, height and pixel format
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// A contour with zero enclosed area reached centroid computation.
    #[error("degenerate contour: {points} points enclose zero area")]
    DegenerateContour {
        /// Number of points on the offending contour
        points: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Image decoding or resampling failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DetectError>;
