use crate::error::{DetectError, Result};

/// Channel layout of an interleaved 8-bit color buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// Red, green, blue
    #[default]
    Rgb8,
    /// Blue, green, red (the usual camera/OpenCV order)
    Bgr8,
    /// Red, green, blue, alpha (alpha ignored)
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    /// Read pixel `i` from `data` as (r, g, b)
    #[inline]
    pub(crate) fn rgb_at(self, data: &[u8], i: usize) -> (u8, u8, u8) {
        let base = i * self.channels();
        match self {
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => (data[base], data[base + 1], data[base + 2]),
            PixelFormat::Bgr8 => (data[base + 2], data[base + 1], data[base]),
        }
    }
}

/// Borrowed, validated color image handed in by the caller
#[derive(Debug, Clone, Copy)]
pub struct ColorImage<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl<'a> ColorImage<'a> {
    /// Largest accepted width or height; masks get a one pixel frame and
    /// must still index with `u32`.
    pub const MAX_DIMENSION: usize = u32::MAX as usize - 2;

    /// Wrap an interleaved buffer.
    ///
    /// Fails with [`DetectError::DegenerateImage`] for a zero-area image,
    /// [`DetectError::ImageTooLarge`] when a side exceeds
    /// [`Self::MAX_DIMENSION`] or the byte count overflows, and
    /// [`DetectError::BufferSizeMismatch`] when the buffer length disagrees
    /// with the dimensions.
    pub fn new(data: &'a [u8], width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DetectError::DegenerateImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(format.channels()))
            .filter(|_| width <= Self::MAX_DIMENSION && height <= Self::MAX_DIMENSION)
            .ok_or(DetectError::ImageTooLarge { width, height })?;
        if data.len() != expected {
            return Err(DetectError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Wrap an RGB buffer
    pub fn rgb(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        Self::new(data, width, height, PixelFormat::Rgb8)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel layout
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw interleaved bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Owned single-channel 8-bit image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Plane {
    /// Create a plane filled with `value`
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Take ownership of a row-major buffer
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(DetectError::BufferSizeMismatch {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Plane width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at (x, y); caller guarantees bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Row-major pixel values
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Hue / lightness / saturation planes using 8-bit conventions
/// (hue in `0..180`, lightness and saturation in `0..=255`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HlsImage {
    /// Hue, degrees halved
    pub hue: Plane,
    /// Lightness
    pub lightness: Plane,
    /// Saturation
    pub saturation: Plane,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_area() {
        let err = ColorImage::rgb(&[], 0, 10).unwrap_err();
        assert!(matches!(
            err,
            DetectError::DegenerateImage {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let data = vec![0u8; 10];
        let err = ColorImage::new(&data, 2, 2, PixelFormat::Rgba8).unwrap_err();
        assert!(matches!(
            err,
            DetectError::BufferSizeMismatch {
                expected: 16,
                actual: 10
            }
        ));
    }

    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let err = ColorImage::rgb(&[], 1 << 62, 4).unwrap_err();
        assert!(matches!(
            err,
            DetectError::ImageTooLarge {
                width: 4611686018427387904,
                height: 4
            }
        ));

        let err = ColorImage::new(&[], usize::MAX, usize::MAX, PixelFormat::Rgba8).unwrap_err();
        assert!(matches!(err, DetectError::ImageTooLarge { .. }));
    }

    #[test]
    fn test_side_beyond_u32_is_rejected() {
        let err = ColorImage::new(&[], u32::MAX as usize, 1, PixelFormat::Rgb8).unwrap_err();
        assert!(matches!(err, DetectError::ImageTooLarge { height: 1, .. }));
    }

    #[test]
    fn test_bgr_channel_order() {
        let data = [1u8, 2, 3];
        assert_eq!(PixelFormat::Bgr8.rgb_at(&data, 0), (3, 2, 1));
        assert_eq!(PixelFormat::Rgb8.rgb_at(&data, 0), (1, 2, 3));
    }
}
