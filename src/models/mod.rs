//! Core data structures shared by the pipeline stages

/// Traced region boundaries
pub mod contour;
/// Radial signals, corner sets and detection output
pub mod corners;
/// Color input, single-channel planes and HLS images
pub mod image;
/// Bit-packed binary masks
pub mod mask;
/// Float and integer 2D points
pub mod point;

pub use contour::Contour;
pub use corners::{CornerSet, DocumentCandidate, Peak, RadialSignal, Shape};
pub use image::{ColorImage, HlsImage, PixelFormat, Plane};
pub use mask::Mask;
pub use point::{Point, PointI};
