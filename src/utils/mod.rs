//! Utility functions for image processing
//!
//! Pixel-level helpers used by the detection stages:
//! - Color conversion (RGB/BGR/RGBA to hue, lightness, saturation)
//! - Gaussian smoothing
//! - Binarization (fixed threshold and median-driven Canny)
//! - Polygon geometry (areas, moments, centroids)
//! - Downscaling to the working resolution

/// Threshold and edge masks
pub mod binarization;
/// Separable Gaussian blur
pub mod blur;
/// RGB to HLS conversion
pub mod color;
/// Shoelace areas, moments, cyclic index distance
pub mod geometry;
/// Working-resolution downscale
pub mod resize;
