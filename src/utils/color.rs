/// Color space conversion into hue / lightness / saturation planes
///
/// Uses the common 8-bit HLS encoding:
/// L = (max + min) / 2, S = range / (max + min) below mid-lightness and
/// range / (510 - max - min) above it, H = hue degrees / 2.
use crate::models::{ColorImage, HlsImage, Plane};

/// Convert one RGB sample to (h, l, s)
#[inline]
pub fn rgb_to_hls_pixel(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let max = r.max(g).max(b) as i32;
    let min = r.min(g).min(b) as i32;
    let sum = max + min;
    let range = max - min;

    let l = ((sum + 1) / 2) as u8;
    if range == 0 {
        return (0, l, 0);
    }

    let s = if sum < 255 {
        range as f32 / sum as f32
    } else {
        range as f32 / (510 - sum) as f32
    };

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let range_f = range as f32;
    let mut h = if max == r as i32 {
        60.0 * (g - b) / range_f
    } else if max == g as i32 {
        60.0 * (b - r) / range_f + 120.0
    } else {
        60.0 * (r - g) / range_f + 240.0
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h = ((h * 0.5).round() as u32 % 180) as u8;
    let s = (s * 255.0).round().min(255.0) as u8;
    (h, l, s)
}

/// Split a color image into HLS planes
pub fn to_hls(image: &ColorImage<'_>) -> HlsImage {
    let (width, height) = (image.width(), image.height());
    let pixel_count = image.pixel_count();
    let format = image.format();
    let data = image.data();

    let mut hue = Vec::with_capacity(pixel_count);
    let mut lightness = Vec::with_capacity(pixel_count);
    let mut saturation = Vec::with_capacity(pixel_count);

    for i in 0..pixel_count {
        let (r, g, b) = format.rgb_at(data, i);
        let (h, l, s) = rgb_to_hls_pixel(r, g, b);
        hue.push(h);
        lightness.push(l);
        saturation.push(s);
    }

    HlsImage {
        hue: Plane::from_parts(width, height, hue),
        lightness: Plane::from_parts(width, height, lightness),
        saturation: Plane::from_parts(width, height, saturation),
    }
}
