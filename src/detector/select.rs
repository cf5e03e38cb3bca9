use crate::config::SelectionConfig;
use crate::models::Contour;

/// Picks the contours worth running corner detection on
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourSelector {
    config: SelectionConfig,
}

impl ContourSelector {
    /// Create a selector with the given settings
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    /// Indices of the `max_candidates` largest contours, largest first.
    ///
    /// Contours shorter than `min_points` or enclosing no area are ignored.
    /// Equal areas keep their extraction order.
    pub fn select_indices(&self, contours: &[Contour]) -> Vec<usize> {
        let mut ranked: Vec<usize> = contours
            .iter()
            .enumerate()
            .filter(|(_, c)| c.len() >= self.config.min_points && c.enclosed_area() > 0.0)
            .map(|(i, _)| i)
            .collect();

        // Stable sort keeps extraction order for ties
        ranked.sort_by(|&a, &b| {
            contours[b]
                .enclosed_area()
                .total_cmp(&contours[a].enclosed_area())
        });
        ranked.truncate(self.config.max_candidates);
        ranked
    }

    /// Same as [`select_indices`](Self::select_indices) but borrows the contours
    pub fn select<'a>(&self, contours: &'a [Contour]) -> Vec<&'a Contour> {
        self.select_indices(contours)
            .into_iter()
            .map(|i| &contours[i])
            .collect()
    }
}
