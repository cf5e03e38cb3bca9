//! doc_corners - Document corner detection for still photographs
//!
//! Finds the quadrilateral outline of a page in a color image and returns its
//! corner points for perspective correction. The pipeline segments the image
//! into a foreground mask, traces outer contours, keeps the largest ones and
//! looks for corners as peaks of each contour's distance from its centroid.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detector settings and environment overrides
pub mod config;
/// Pipeline stages (preprocessing, contours, selection, corners, classification)
pub mod detector;
/// Error type shared by every stage
pub mod error;
/// Core data structures (ColorImage, Mask, Contour, CornerSet, etc.)
pub mod models;
/// Stage orchestration and intermediate results
pub mod pipeline;
/// Image file helpers for binaries, tests and benches
pub mod tools;
/// Pixel-level helpers (color conversion, blur, segmentation, geometry)
pub mod utils;

pub use config::{
    CornerConfig, DetectorConfig, PreprocessConfig, Segmentation, SelectionConfig,
    ThresholdChannel,
};
pub use detector::{
    ContourExtractor, ContourSelector, CornerDetection, CornerDetector, Preprocessor,
    ShapeClassifier,
};
pub use error::{DetectError, Result};
pub use models::{
    ColorImage, Contour, CornerSet, DocumentCandidate, Mask, PixelFormat, Point, PointI, Shape,
};
pub use pipeline::{CandidateTrace, DetectionTrace};

use rayon::prelude::*;
use tracing::instrument;

/// Detect document candidates in an RGB image with default settings
///
/// # Arguments
/// * `image` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Candidates for the largest contours, largest first. An empty vector
/// means no usable contour was found.
pub fn detect(image: &[u8], width: usize, height: usize) -> Result<Vec<DocumentCandidate>> {
    let image = ColorImage::rgb(image, width, height)?;
    DocumentDetector::default().detect(&image)
}

/// Detector with a validated configuration
#[derive(Debug, Clone, Default)]
pub struct DocumentDetector {
    config: DetectorConfig,
}

impl DocumentDetector {
    /// Create a detector, rejecting out-of-range settings
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a detector configured from `DOC_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(DetectorConfig::from_env())
    }

    /// Settings in use
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect document candidates in one image
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &ColorImage<'_>) -> Result<Vec<DocumentCandidate>> {
        Ok(pipeline::run(image, &self.config)?.documents)
    }

    /// Detect and keep every intermediate result
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect_traced(&self, image: &ColorImage<'_>) -> Result<DetectionTrace> {
        pipeline::run(image, &self.config)
    }

    /// Detect in many images in parallel; results keep the input order
    #[instrument(skip_all, fields(images = images.len()))]
    pub fn detect_batch(&self, images: &[ColorImage<'_>]) -> Vec<Result<Vec<DocumentCandidate>>> {
        images.par_iter().map(|image| self.detect(image)).collect()
    }
}
