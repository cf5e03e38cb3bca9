use crate::config::DetectorConfig;
use crate::detector::{
    ContourExtractor, ContourSelector, CornerDetection, CornerDetector, Preprocessor,
    ShapeClassifier,
};
use crate::error::Result;
use crate::models::{ColorImage, Contour, DocumentCandidate, Mask, Shape};
use crate::utils::resize::downscale_to_width;

/// Intermediate results for one selected contour
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTrace {
    /// Index into [`DetectionTrace::contours`]
    pub contour_index: usize,
    /// Radial signal, peaks and corners in working coordinates
    pub detection: CornerDetection,
    /// Label from the corner count
    pub shape: Shape,
}

/// Every intermediate product of one detection run
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionTrace {
    /// Input pixels per working pixel; 1.0 when no downscale happened
    pub scale: f64,
    /// Foreground mask at working resolution
    pub mask: Mask,
    /// All outer contours in extraction order, working coordinates
    pub contours: Vec<Contour>,
    /// Indices of the selected contours, largest first
    pub selected: Vec<usize>,
    /// Corner detection per selected contour
    pub candidates: Vec<CandidateTrace>,
    /// Final output in input-image coordinates
    pub documents: Vec<DocumentCandidate>,
}

/// Run every stage on one image, keeping the intermediates
pub(crate) fn run(image: &ColorImage<'_>, config: &DetectorConfig) -> Result<DetectionTrace> {
    let working = config
        .working_width
        .and_then(|w| downscale_to_width(image, w));

    match &working {
        Some(w) => {
            tracing::debug!(
                from_width = image.width(),
                to_width = w.width,
                to_height = w.height,
                "downscaled to working width"
            );
            let resized = ColorImage::rgb(&w.data, w.width, w.height)?;
            run_stages(&resized, config, w.scale)
        }
        None => run_stages(image, config, 1.0),
    }
}

fn run_stages(
    image: &ColorImage<'_>,
    config: &DetectorConfig,
    scale: f64,
) -> Result<DetectionTrace> {
    let mask = Preprocessor::new(config.preprocess).process(image);
    tracing::debug!(foreground = mask.count_foreground(), "mask ready");

    let contours = ContourExtractor::extract(&mask);
    let selected = ContourSelector::new(config.selection).select_indices(&contours);
    tracing::debug!(
        contours = contours.len(),
        selected = selected.len(),
        "contours ranked"
    );

    let detector = CornerDetector::new(config.corners);
    let mut candidates = Vec::with_capacity(selected.len());
    let mut documents = Vec::with_capacity(selected.len());

    for &contour_index in &selected {
        let contour = &contours[contour_index];
        let detection = detector.detect(contour)?;
        let shape = ShapeClassifier::classify(&detection.corners);

        let corners = if scale == 1.0 {
            detection.corners.clone()
        } else {
            detection.corners.map(|p| p.scale(scale))
        };
        documents.push(DocumentCandidate {
            contour_index,
            area: contour.enclosed_area(),
            shape,
            corners,
        });
        candidates.push(CandidateTrace {
            contour_index,
            detection,
            shape,
        });
    }

    Ok(DetectionTrace {
        scale,
        mask,
        contours,
        selected,
        candidates,
        documents,
    })
}
