/// Downscaling to a fixed working width before detection
use crate::models::ColorImage;
use image::RgbImage;
use image::imageops::{self, FilterType};

/// An owned RGB copy of an image at working resolution
#[derive(Debug, Clone)]
pub struct WorkingImage {
    /// Interleaved RGB bytes
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Factor mapping working coordinates back to the input image
    pub scale: f64,
}

/// Shrink `image` so its width is `target_width`, keeping the aspect ratio.
///
/// Returns `None` when the image is already at most `target_width` wide;
/// images are never upscaled.
pub fn downscale_to_width(image: &ColorImage<'_>, target_width: usize) -> Option<WorkingImage> {
    if target_width == 0 || image.width() <= target_width {
        return None;
    }

    let scale = image.width() as f64 / target_width as f64;
    let target_height = ((image.height() as f64 / scale).round() as usize).max(1);

    // Both sides are bounded by ColorImage::MAX_DIMENSION, so they fit u32
    let format = image.format();
    let data = image.data();
    let rgb = RgbImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let (r, g, b) = format.rgb_at(data, y as usize * image.width() + x as usize);
        image::Rgb([r, g, b])
    });

    let resized = imageops::resize(
        &rgb,
        target_width as u32,
        target_height as u32,
        FilterType::Triangle,
    );

    Some(WorkingImage {
        data: resized.into_raw(),
        width: target_width,
        height: target_height,
        scale,
    })
}
