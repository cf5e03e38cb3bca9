// Run document corner detection on image files and print the candidates
use doc_corners::tools::{describe, load_rgb};
use doc_corners::{ColorImage, DocumentDetector, Shape};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: scan_corners <image>...");
        return ExitCode::FAILURE;
    }

    let detector = match DocumentDetector::from_env() {
        Ok(detector) => detector,
        Err(e) => {
            eprintln!("config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut found = 0;
    for img_path in &paths {
        let path = Path::new(img_path);
        let (rgb, width, height) = match load_rgb(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                println!("SKIP: {img_path} -> {e}");
                continue;
            }
        };

        let candidates = ColorImage::rgb(&rgb, width, height)
            .and_then(|image| detector.detect(&image));
        match candidates {
            Ok(candidates) if candidates.is_empty() => {
                println!("NONE: {img_path} ({width}x{height}) -> no usable contour");
            }
            Ok(candidates) => {
                if candidates.iter().any(|c| c.shape == Shape::Quadrilateral) {
                    found += 1;
                }
                println!("OK: {img_path} ({width}x{height}) -> {} candidates", candidates.len());
                for candidate in &candidates {
                    println!("  {}", describe(candidate));
                    if let Some([tl, tr, br, bl]) = candidate.quad() {
                        println!(
                            "    tl=({}, {}) tr=({}, {}) br=({}, {}) bl=({}, {})",
                            tl.x, tl.y, tr.x, tr.y, br.x, br.y, bl.x, bl.y
                        );
                    }
                }
            }
            Err(e) => println!("FAIL: {img_path} -> {e}"),
        }
    }

    println!("\nDocuments: {}/{}", found, paths.len());
    ExitCode::SUCCESS
}
