use crate::config::{PreprocessConfig, Segmentation, ThresholdChannel};
use crate::models::{ColorImage, HlsImage, Mask, Plane};
use crate::utils::binarization::{auto_canny, threshold_mask};
use crate::utils::blur::gaussian_blur;
use crate::utils::color::to_hls;

/// Turns a color image into a foreground mask of the same size.
///
/// The image is split into hue, lightness and saturation, each channel is
/// smoothed independently, and the configured channel is segmented either by
/// a fixed threshold or by median-driven Canny edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Create a preprocessor with the given settings
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    fn blur(&self, plane: &Plane) -> Plane {
        gaussian_blur(plane, self.config.blur_radius, self.config.blur_sigma)
    }

    /// All three HLS planes, each smoothed on its own
    pub fn smoothed_hls(&self, image: &ColorImage<'_>) -> HlsImage {
        let hls = to_hls(image);
        HlsImage {
            hue: self.blur(&hls.hue),
            lightness: self.blur(&hls.lightness),
            saturation: self.blur(&hls.saturation),
        }
    }

    /// Smoothed channel that segmentation runs on.
    ///
    /// Channels are blurred independently, so only the configured one is
    /// computed.
    pub fn smoothed_channel(&self, image: &ColorImage<'_>) -> Plane {
        let hls = to_hls(image);
        match self.config.channel {
            ThresholdChannel::Lightness => self.blur(&hls.lightness),
            ThresholdChannel::Saturation => self.blur(&hls.saturation),
        }
    }

    /// Produce the binary mask
    pub fn process(&self, image: &ColorImage<'_>) -> Mask {
        let channel = self.smoothed_channel(image);
        match self.config.segmentation {
            Segmentation::Threshold { cutoff } => threshold_mask(&channel, cutoff),
            Segmentation::AutoCanny { sigma } => auto_canny(&channel, sigma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone(
        width: usize,
        height: usize,
        background: u8,
        inside: impl Fn(usize, usize) -> bool,
    ) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let v = if inside(x, y) { 255 } else { background };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        data
    }

    #[test]
    fn test_threshold_isolates_white_block() {
        let data = two_tone(40, 30, 0, |x, y| (10..30).contains(&x) && (8..22).contains(&y));
        let image = ColorImage::rgb(&data, 40, 30).unwrap();
        let mask = Preprocessor::default().process(&image);

        assert_eq!(mask.width(), 40);
        assert_eq!(mask.height(), 30);
        assert!(mask.get(20, 15));
        assert!(mask.get(10, 15)); // straight edges survive the blur
        assert!(!mask.get(9, 15));
        assert!(!mask.get(10, 8)); // corners get rounded off
        assert!(!mask.get(2, 2));
    }

    #[test]
    fn test_smoothed_channel_matches_hls_plane() {
        let data: Vec<u8> = (0..24 * 18)
            .flat_map(|i| {
                let v = (i * 7 % 256) as u8;
                [v, v / 2, 255 - v]
            })
            .collect();
        let image = ColorImage::rgb(&data, 24, 18).unwrap();
        let pre = Preprocessor::default();
        let hls = pre.smoothed_hls(&image);
        assert_eq!(pre.smoothed_channel(&image), hls.lightness);

        let pre = Preprocessor::new(PreprocessConfig {
            channel: ThresholdChannel::Saturation,
            ..PreprocessConfig::default()
        });
        assert_eq!(pre.smoothed_channel(&image), hls.saturation);
        assert_eq!(hls.hue.width(), 24);
    }

    #[test]
    fn test_dark_image_has_empty_mask() {
        let data = vec![20u8; 16 * 16 * 3];
        let image = ColorImage::rgb(&data, 16, 16).unwrap();
        assert!(Preprocessor::default().process(&image).is_empty());
    }

    #[test]
    fn test_canny_strategy_marks_outline() {
        let data = two_tone(60, 60, 60, |x, y| (15..45).contains(&x) && (15..45).contains(&y));
        let image = ColorImage::rgb(&data, 60, 60).unwrap();
        let pre = Preprocessor::new(PreprocessConfig {
            segmentation: Segmentation::AutoCanny { sigma: 0.33 },
            ..PreprocessConfig::default()
        });
        let mask = pre.process(&image);
        assert!(!mask.is_empty());
        assert!(!mask.get(30, 30));
    }
}
