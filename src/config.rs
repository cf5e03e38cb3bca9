//! Detector configuration
//!
//! Every tunable constant of the pipeline lives here. Defaults match the
//! values the detector was tuned with on 500-pixel-wide photographs;
//! `DetectorConfig::from_env` overlays `DOC_*` environment variables.

use crate::error::{DetectError, Result};

/// How the preprocessor turns the smoothed channel into a mask
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segmentation {
    /// Foreground where the channel value is above `cutoff`
    Threshold {
        /// Fixed, non-adaptive cutoff
        cutoff: u8,
    },
    /// Canny edges with hysteresis thresholds at `(1 ∓ sigma) * median`
    AutoCanny {
        /// Relative spread around the median
        sigma: f32,
    },
}

impl Default for Segmentation {
    fn default() -> Self {
        Segmentation::Threshold { cutoff: 150 }
    }
}

/// Which HLS channel is segmented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdChannel {
    /// Lightness: white paper against a darker scene
    #[default]
    Lightness,
    /// Saturation
    Saturation,
}

/// Preprocessor settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessConfig {
    /// Gaussian kernel radius; the kernel is `2 * radius + 1` taps wide
    pub blur_radius: usize,
    /// Gaussian sigma; non-positive derives it from the radius
    pub blur_sigma: f32,
    /// Channel to segment
    pub channel: ThresholdChannel,
    /// Segmentation strategy
    pub segmentation: Segmentation,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_radius: 3,
            blur_sigma: 1.5,
            channel: ThresholdChannel::Lightness,
            segmentation: Segmentation::default(),
        }
    }
}

/// Contour ranking settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Contours with fewer points are noise
    pub min_points: usize,
    /// Number of largest contours handed to corner detection
    pub max_candidates: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_points: 200,
            max_candidates: 2,
        }
    }
}

/// Corner detector settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerConfig {
    /// Largest wavelet width as a fraction of the signal length, in `(0, 1]`
    pub magic: f64,
    /// Fraction of the signal at each end inside which a first/last peak
    /// pair is treated as one corner split by the seam
    pub margin: f64,
    /// Minimum ridge signal-to-noise ratio
    pub min_snr: f64,
    /// Percentile of finest-scale coefficients used as the noise floor
    pub noise_percentile: f64,
    /// Signals whose range is within this fraction of their maximum have
    /// no corners
    pub flatness_tolerance: f64,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            magic: 0.1,
            margin: 0.05,
            min_snr: 1.0,
            noise_percentile: 10.0,
            flatness_tolerance: 0.02,
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Preprocessor settings
    pub preprocess: PreprocessConfig,
    /// Contour selection settings
    pub selection: SelectionConfig,
    /// Corner detection settings
    pub corners: CornerConfig,
    /// Wider images are downscaled to this width first; `None` disables
    pub working_width: Option<usize>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            selection: SelectionConfig::default(),
            corners: CornerConfig::default(),
            working_width: Some(500),
        }
    }
}

impl DetectorConfig {
    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        let c = &self.corners;
        if !(c.magic > 0.0 && c.magic <= 1.0) {
            return Err(DetectError::InvalidConfig(format!(
                "peak magic fraction must be in (0, 1], got {}",
                c.magic
            )));
        }
        if !(0.0..0.5).contains(&c.margin) {
            return Err(DetectError::InvalidConfig(format!(
                "wrap-around margin must be in [0, 0.5), got {}",
                c.margin
            )));
        }
        if !(0.0..=100.0).contains(&c.noise_percentile) {
            return Err(DetectError::InvalidConfig(format!(
                "noise percentile must be in [0, 100], got {}",
                c.noise_percentile
            )));
        }
        if c.flatness_tolerance.is_nan() || c.flatness_tolerance < 0.0 {
            return Err(DetectError::InvalidConfig(format!(
                "flatness tolerance must be non-negative, got {}",
                c.flatness_tolerance
            )));
        }
        if let Segmentation::AutoCanny { sigma } = self.preprocess.segmentation {
            if !(0.0..=1.0).contains(&sigma) {
                return Err(DetectError::InvalidConfig(format!(
                    "canny sigma must be in [0, 1], got {sigma}"
                )));
            }
        }
        if self.working_width == Some(0) {
            return Err(DetectError::InvalidConfig(
                "working width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Defaults overlaid with `DOC_*` environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let default_cutoff = match defaults.preprocess.segmentation {
            Segmentation::Threshold { cutoff } => cutoff,
            Segmentation::AutoCanny { .. } => 150,
        };

        let segmentation = match env_string("DOC_SEGMENTATION").as_deref() {
            Some("canny") => Segmentation::AutoCanny {
                sigma: parse_env_f32("DOC_CANNY_SIGMA", 0.33),
            },
            _ => Segmentation::Threshold {
                cutoff: parse_env_u8("DOC_THRESHOLD", default_cutoff),
            },
        };
        let channel = match env_string("DOC_CHANNEL").as_deref() {
            Some("saturation") => ThresholdChannel::Saturation,
            _ => ThresholdChannel::Lightness,
        };
        let working_width = match parse_env_usize(
            "DOC_WORKING_WIDTH",
            defaults.working_width.unwrap_or(0),
        ) {
            0 => None,
            w => Some(w),
        };

        Self {
            preprocess: PreprocessConfig {
                blur_radius: parse_env_usize("DOC_BLUR_RADIUS", defaults.preprocess.blur_radius),
                blur_sigma: parse_env_f32("DOC_BLUR_SIGMA", defaults.preprocess.blur_sigma),
                channel,
                segmentation,
            },
            selection: SelectionConfig {
                min_points: parse_env_usize(
                    "DOC_MIN_CONTOUR_POINTS",
                    defaults.selection.min_points,
                ),
                max_candidates: parse_env_usize(
                    "DOC_MAX_CANDIDATES",
                    defaults.selection.max_candidates,
                ),
            },
            corners: CornerConfig {
                magic: parse_env_f64("DOC_PEAK_MAGIC", defaults.corners.magic),
                margin: parse_env_f64("DOC_PEAK_MARGIN", defaults.corners.margin),
                ..defaults.corners
            },
            working_width,
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .unwrap_or(default)
}

fn parse_env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}
