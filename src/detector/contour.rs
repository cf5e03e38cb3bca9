use crate::models::{Contour, Mask, PointI};
use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};

/// Traces the outermost boundaries of the connected foreground regions.
///
/// Border following after Suzuki & Abe with 8-connectivity. Every border
/// is followed so nesting can be resolved, but only outer borders without a
/// parent are reported: holes and anything nested inside a hole are dropped.
pub struct ContourExtractor;

impl ContourExtractor {
    /// Outer contours in raster order of their starting pixel.
    ///
    /// Each contour starts at its topmost-leftmost pixel and first heads down
    /// the left side, so all returned contours share one orientation.
    pub fn extract(mask: &Mask) -> Vec<Contour> {
        find_contours::<i32>(&padded(mask))
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| {
                Contour::new(
                    c.points
                        .into_iter()
                        .map(|p| PointI::new(p.x - 1, p.y - 1))
                        .collect(),
                )
            })
            .collect()
    }
}

/// Copy the mask into a gray image with a one pixel background frame.
///
/// Without the frame, regions touching the image edge come back as holes.
fn padded(mask: &Mask) -> GrayImage {
    let mut gray = GrayImage::new(mask.width() as u32 + 2, mask.height() as u32 + 2);
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get(x, y) {
                gray.put_pixel(x as u32 + 1, y as u32 + 1, Luma([255]));
            }
        }
    }
    gray
}
