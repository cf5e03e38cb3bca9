/// Plane-to-mask conversions: fixed thresholding and automatic Canny edges
use crate::models::{Mask, Plane};
use image::GrayImage;

/// Global threshold: a pixel is foreground when its value is above `cutoff`
pub fn threshold_mask(plane: &Plane, cutoff: u8) -> Mask {
    let width = plane.width();
    let data = plane.as_slice();
    Mask::from_fn(width, plane.height(), |x, y| data[y * width + x] > cutoff)
}

/// Median intensity from the cumulative histogram: the first level whose
/// cumulative share reaches one half.
pub fn histogram_median(plane: &Plane) -> u8 {
    let data = plane.as_slice();
    if data.is_empty() {
        return 0;
    }

    let mut histogram = [0u32; 256];
    for &v in data {
        histogram[v as usize] += 1;
    }

    let total = data.len() as u64;
    let mut cumulative = 0u64;
    for (level, &count) in histogram.iter().enumerate() {
        cumulative += count as u64;
        // cumulative / total >= 0.5
        if cumulative * 2 >= total {
            return level as u8;
        }
    }
    255
}

/// Hysteresis thresholds `(low, high)` around the median:
/// `max(0, (1 - sigma) * median)` and `min(255, (1 + sigma) * median)`,
/// rounded to whole intensity levels
pub fn auto_canny_thresholds(median: u8, sigma: f32) -> (f32, f32) {
    let m = median as f32;
    let low = ((1.0 - sigma) * m).max(0.0).round();
    let high = ((1.0 + sigma) * m).min(255.0).round();
    (low, high)
}

/// Canny edge mask with thresholds derived from the plane's median
pub fn auto_canny(plane: &Plane, sigma: f32) -> Mask {
    let (low, high) = auto_canny_thresholds(histogram_median(plane), sigma);
    let width = plane.width();

    let Some(gray) = GrayImage::from_raw(
        width as u32,
        plane.height() as u32,
        plane.as_slice().to_vec(),
    ) else {
        return Mask::new(width, plane.height());
    };

    // Zero-gradient pixels are never edges, even when the median is black
    let edges = imageproc::edges::canny(
        &gray,
        low.max(f32::MIN_POSITIVE),
        high.max(f32::MIN_POSITIVE),
    );
    Mask::from_fn(width, plane.height(), |x, y| {
        edges.get_pixel(x as u32, y as u32)[0] > 0
    })
}
