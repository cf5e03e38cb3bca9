use crate::config::CornerConfig;
use crate::detector::peaks::find_peaks_cwt;
use crate::error::{DetectError, Result};
use crate::models::{Contour, CornerSet, Peak, RadialSignal};
use crate::utils::geometry::contour_centroid;

/// Everything corner detection produced for one contour
#[derive(Debug, Clone, PartialEq)]
pub struct CornerDetection {
    /// Distance of every contour point from the centroid
    pub signal: RadialSignal,
    /// Surviving peaks, ascending by index
    pub peaks: Vec<Peak>,
    /// Contour points at the peaks
    pub corners: CornerSet,
}

/// Finds corners as the peaks of a contour's radial distance signal
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerDetector {
    config: CornerConfig,
}

impl CornerDetector {
    /// Create a detector with the given settings
    pub fn new(config: CornerConfig) -> Self {
        Self { config }
    }

    /// Distances from the region centroid, in traversal order.
    ///
    /// Fails with [`DetectError::DegenerateContour`] when the contour
    /// encloses no area.
    pub fn radial_signal(contour: &Contour) -> Result<RadialSignal> {
        let centroid = contour_centroid(contour.points()).ok_or(DetectError::DegenerateContour {
            points: contour.len(),
        })?;
        let values = contour
            .points()
            .iter()
            .map(|p| p.to_point().distance(&centroid))
            .collect();
        Ok(RadialSignal { centroid, values })
    }

    /// Run peak search on one contour
    pub fn detect(&self, contour: &Contour) -> Result<CornerDetection> {
        let signal = Self::radial_signal(contour)?;
        let n = signal.len();

        let mut indices = if is_flat(&signal.values, self.config.flatness_tolerance) {
            Vec::new()
        } else {
            find_peaks_cwt(&signal.values, &self.config)
        };
        merge_wrapped_peaks(&mut indices, n, self.config.margin);
        indices.retain(|&i| i < n);

        let peaks: Vec<Peak> = indices
            .iter()
            .map(|&index| Peak {
                index,
                distance: signal.values[index],
            })
            .collect();
        let corners = CornerSet::new(indices.iter().filter_map(|&i| contour.get(i)).collect());

        tracing::debug!(
            points = n,
            centroid_x = signal.centroid.x,
            centroid_y = signal.centroid.y,
            peaks = peaks.len(),
            "corner detection"
        );

        Ok(CornerDetection {
            signal,
            peaks,
            corners,
        })
    }
}

/// True when the spread of `values` is within `tolerance` of their maximum
fn is_flat(values: &[f64], tolerance: f64) -> bool {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return true;
    };
    let min = values.iter().copied().fold(max, f64::min);
    max - min <= tolerance * max
}

/// Drop the last peak when it and the first peak sit within `margin` of
/// opposite ends of a signal of length `n`.
///
/// Such a pair is one corner split by the seam of the closed contour. Only
/// the outermost pair is considered; further peaks inside the margins are
/// kept.
pub fn merge_wrapped_peaks(peaks: &mut Vec<usize>, n: usize, margin: f64) {
    if peaks.len() < 2 {
        return;
    }
    let first = peaks[0] as f64;
    let last = peaks[peaks.len() - 1] as f64;
    let len = n as f64;
    if first < margin * len && last > (1.0 - margin) * len {
        peaks.pop();
    }
}
