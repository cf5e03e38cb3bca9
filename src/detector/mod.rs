//! Document detection stages
//!
//! Each stage is a pure function of its input and settings:
//! - Preprocessing (color image to foreground mask)
//! - Contour extraction (mask to outer boundaries)
//! - Contour selection (largest boundaries worth examining)
//! - Corner detection (radial distance peaks of one boundary)
//! - Shape classification (corner count to a label)

/// Arity check on corner sets
pub mod classify;
/// Outer border following on binary masks
pub mod contour;
/// Radial signal and corner extraction
pub mod corners;
/// Wavelet peak search on closed signals
pub mod peaks;
/// Color to mask conversion
pub mod preprocess;
/// Area ranking of contours
pub mod select;

pub use classify::ShapeClassifier;
pub use contour::ContourExtractor;
pub use corners::{CornerDetection, CornerDetector};
pub use preprocess::Preprocessor;
pub use select::ContourSelector;
