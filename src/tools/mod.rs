use crate::error::Result;
use crate::models::DocumentCandidate;
use std::path::Path;

/// Load an image file as RGB bytes along with its dimensions
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize)> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok((rgb.into_raw(), width as usize, height as usize))
}

/// One-line summary of a candidate: shape, area and corners
pub fn describe(candidate: &DocumentCandidate) -> String {
    let corners: Vec<String> = candidate
        .corners
        .points()
        .iter()
        .map(|p| format!("({}, {})", p.x, p.y))
        .collect();
    format!(
        "contour #{} {} area={:.0} corners=[{}]",
        candidate.contour_index,
        candidate.shape,
        candidate.area,
        corners.join(", ")
    )
}
