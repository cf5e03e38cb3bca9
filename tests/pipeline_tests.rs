//! End-to-end detection tests on synthetic scenes
//!
//! Every scene is generated in memory: white shapes on a dark background,
//! the situation the default threshold segmentation is tuned for.

use doc_corners::tools::load_rgb;
use doc_corners::{
    ColorImage, DetectError, DetectorConfig, DocumentDetector, PixelFormat, PointI, Segmentation,
    Shape, detect,
};

fn scene(
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

fn page(width: usize, height: usize, x: (usize, usize), y: (usize, usize)) -> Vec<u8> {
    scene(width, height, 0, |px, py| {
        (x.0..x.1).contains(&px) && (y.0..y.1).contains(&py)
    })
}

fn assert_near(actual: PointI, expected: (i32, i32), tolerance: i32) {
    assert!(
        (actual.x - expected.0).abs() <= tolerance && (actual.y - expected.1).abs() <= tolerance,
        "corner {:?} not within {} px of {:?}",
        actual,
        tolerance,
        expected
    );
}

#[test]
fn test_centered_rectangle_is_quadrilateral() {
    let data = page(500, 375, (100, 400), (88, 288));
    let image = ColorImage::rgb(&data, 500, 375).unwrap();
    let trace = DocumentDetector::default().detect_traced(&image).unwrap();

    assert_eq!(trace.contours.len(), 1);
    assert_eq!(trace.documents.len(), 1);

    let doc = &trace.documents[0];
    assert_eq!(doc.shape, Shape::Quadrilateral);
    assert_eq!(doc.corners.len(), 4);

    // Traversal order: down the left side first
    let expected = [(100, 88), (100, 287), (399, 287), (399, 88)];
    for (corner, want) in doc.corners.points().iter().zip(expected) {
        assert_near(*corner, want, 2);
    }

    let [tl, tr, br, bl] = doc.quad().unwrap();
    assert_near(tl, (100, 88), 2);
    assert_near(tr, (399, 88), 2);
    assert_near(br, (399, 287), 2);
    assert_near(bl, (100, 287), 2);
}

#[test]
fn test_peaks_map_to_contour_points() {
    let data = page(500, 375, (100, 400), (88, 288));
    let image = ColorImage::rgb(&data, 500, 375).unwrap();
    let trace = DocumentDetector::default().detect_traced(&image).unwrap();

    for candidate in &trace.candidates {
        let contour = &trace.contours[candidate.contour_index];
        let points: Vec<PointI> = candidate
            .detection
            .peaks
            .iter()
            .map(|p| {
                assert!(p.index < contour.len());
                contour.points()[p.index]
            })
            .collect();
        assert_eq!(points, candidate.detection.corners.points());
    }
}

#[test]
fn test_rerun_is_identical() {
    let data = page(500, 375, (60, 430), (40, 330));
    let image = ColorImage::rgb(&data, 500, 375).unwrap();
    let detector = DocumentDetector::default();

    let first = detector.detect_traced(&image).unwrap();
    let second = detector.detect_traced(&image).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_black_image_has_no_candidates() {
    let data = vec![0u8; 500 * 375 * 3];
    assert!(detect(&data, 500, 375).unwrap().is_empty());
}

#[test]
fn test_disk_is_not_a_document() {
    let data = scene(500, 375, 0, |x, y| {
        let (dx, dy) = (x as i64 - 250, y as i64 - 187);
        dx * dx + dy * dy <= 100 * 100
    });
    let candidates = detect(&data, 500, 375).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].shape, Shape::Other);
    assert!(candidates[0].quad().is_none());
}

#[test]
fn test_rotated_page() {
    let (sin, cos) = 20f64.to_radians().sin_cos();
    let data = scene(500, 375, 0, |x, y| {
        let (dx, dy) = (x as f64 - 250.0, y as f64 - 187.0);
        let u = cos * dx + sin * dy;
        let v = -sin * dx + cos * dy;
        u.abs() <= 110.0 && v.abs() <= 80.0
    });
    let candidates = detect(&data, 500, 375).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].shape, Shape::Quadrilateral);

    let [tl, tr, br, bl] = candidates[0].quad().unwrap();
    assert_near(tl, (174, 74), 4);
    assert_near(tr, (381, 149), 4);
    assert_near(br, (326, 300), 4);
    assert_near(bl, (119, 225), 4);
}

#[test]
fn test_two_pages_largest_first() {
    let data = scene(500, 375, 0, |x, y| {
        ((50..250).contains(&x) && (60..300).contains(&y))
            || ((300..460).contains(&x) && (100..260).contains(&y))
    });
    let candidates = detect(&data, 500, 375).unwrap();

    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].area > candidates[1].area);
    assert_eq!(candidates[0].contour_index, 0);
    assert_eq!(candidates[1].contour_index, 1);
    for c in &candidates {
        assert_eq!(c.shape, Shape::Quadrilateral);
    }
}

#[test]
fn test_large_image_maps_back_to_input_coordinates() {
    let data = page(1000, 750, (200, 800), (176, 576));
    let image = ColorImage::rgb(&data, 1000, 750).unwrap();
    let trace = DocumentDetector::default().detect_traced(&image).unwrap();

    assert_eq!(trace.scale, 2.0);
    assert_eq!(trace.mask.width(), 500);
    assert_eq!(trace.documents.len(), 1);

    let [tl, tr, br, bl] = trace.documents[0].quad().unwrap();
    assert_near(tl, (200, 176), 8);
    assert_near(tr, (799, 176), 8);
    assert_near(br, (799, 575), 8);
    assert_near(bl, (200, 575), 8);
}

#[test]
fn test_full_resolution_when_working_width_disabled() {
    let data = page(600, 400, (100, 500), (80, 320));
    let image = ColorImage::rgb(&data, 600, 400).unwrap();
    let detector = DocumentDetector::new(DetectorConfig {
        working_width: None,
        ..DetectorConfig::default()
    })
    .unwrap();
    let trace = detector.detect_traced(&image).unwrap();
    assert_eq!(trace.scale, 1.0);
    assert_eq!(trace.mask.width(), 600);
}

#[test]
fn test_bgr_input_matches_rgb() {
    let rgb = page(500, 375, (100, 400), (88, 288));
    let rgb_image = ColorImage::rgb(&rgb, 500, 375).unwrap();
    let bgr_image = ColorImage::new(&rgb, 500, 375, PixelFormat::Bgr8).unwrap();

    let detector = DocumentDetector::default();
    assert_eq!(
        detector.detect(&rgb_image).unwrap(),
        detector.detect(&bgr_image).unwrap()
    );
}

#[test]
fn test_degenerate_input_is_reported() {
    assert!(matches!(
        detect(&[], 0, 375),
        Err(DetectError::DegenerateImage { width: 0, height: 375 })
    ));
    assert!(matches!(
        detect(&[0u8; 10], 4, 4),
        Err(DetectError::BufferSizeMismatch { expected: 48, actual: 10 })
    ));
    assert!(matches!(
        detect(&[], 1 << 62, 4),
        Err(DetectError::ImageTooLarge { height: 4, .. })
    ));
}

#[test]
fn test_batch_keeps_input_order() {
    let doc = page(500, 375, (100, 400), (88, 288));
    let empty = vec![0u8; 500 * 375 * 3];
    let images = vec![
        ColorImage::rgb(&doc, 500, 375).unwrap(),
        ColorImage::rgb(&empty, 500, 375).unwrap(),
        ColorImage::rgb(&doc, 500, 375).unwrap(),
    ];

    let detector = DocumentDetector::default();
    let results = detector.detect_batch(&images);
    assert_eq!(results.len(), 3);

    let results: Vec<_> = results.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(results[0].len(), 1);
    assert!(results[1].is_empty());
    assert_eq!(results[0], results[2]);
    assert_eq!(results[0], detector.detect(&images[0]).unwrap());
}

#[test]
fn test_canny_segmentation_runs_end_to_end() {
    let data = scene(500, 375, 60, |x, y| {
        (100..400).contains(&x) && (88..288).contains(&y)
    });
    let image = ColorImage::rgb(&data, 500, 375).unwrap();
    let mut config = DetectorConfig::default();
    config.preprocess.segmentation = Segmentation::AutoCanny { sigma: 0.33 };
    let trace = DocumentDetector::new(config)
        .unwrap()
        .detect_traced(&image)
        .unwrap();

    assert!(!trace.mask.is_empty());
    // Edges hug the page outline, not its interior or the background
    assert!((96..=103).any(|x| trace.mask.get(x, 188)));
    assert!(!trace.mask.get(250, 188));
    assert!(!trace.mask.get(20, 20));
    assert!(trace.documents.len() <= config.selection.max_candidates);
}

#[test]
fn test_file_round_trip() {
    let (w, h) = (500u32, 375u32);
    let img = image::RgbImage::from_fn(w, h, |x, y| {
        if (100..400).contains(&x) && (88..288).contains(&y) {
            image::Rgb([250, 250, 245])
        } else {
            image::Rgb([30, 35, 40])
        }
    });
    let path = std::env::temp_dir().join(format!("doc_corners_{}.png", std::process::id()));
    img.save(&path).unwrap();

    let (rgb, width, height) = load_rgb(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!((width, height), (500, 375));

    let candidates = detect(&rgb, width, height).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].shape, Shape::Quadrilateral);
}
