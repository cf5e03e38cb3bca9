/// Separable Gaussian smoothing of 8-bit planes
use crate::models::Plane;
use image::{ImageBuffer, Luma};
use imageproc::filter::separable_filter_equal;

/// Sigma used when the caller passes a non-positive one, derived from the
/// kernel size the same way common vision libraries do.
pub fn default_sigma(radius: usize) -> f32 {
    let ksize = (2 * radius + 1) as f32;
    0.3 * ((ksize - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1D Gaussian weights for offsets `-radius..=radius`
pub fn gaussian_kernel(radius: usize, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        default_sigma(radius)
    };
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let t = i as f32 - radius as f32;
            (-t * t / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Blur a plane with a `(2*radius+1)`-tap Gaussian, rows then columns.
///
/// Filtering runs on f32 samples so the intermediate pass is not
/// quantised; edge pixels are replicated. A zero radius returns an
/// unchanged copy.
pub fn gaussian_blur(plane: &Plane, radius: usize, sigma: f32) -> Plane {
    let (width, height) = (plane.width(), plane.height());
    if radius == 0 || width == 0 || height == 0 {
        return plane.clone();
    }

    let samples: Vec<f32> = plane.as_slice().iter().map(|&v| v as f32).collect();
    let Some(src) = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(
        width as u32,
        height as u32,
        samples,
    ) else {
        return plane.clone();
    };

    let kernel = gaussian_kernel(radius, sigma);
    let blurred = separable_filter_equal(&src, &kernel);

    let out = blurred
        .into_raw()
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Plane::from_parts(width, height, out)
}
