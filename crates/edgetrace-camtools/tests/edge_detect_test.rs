use edgetrace_camtools::edge_detect::{
    load_rgba, sharpen, EdgeDetectionSettings, EdgeDetector, EdgeMethod,
};
use edgetrace_core::PixelCoordinate;
use image::{Rgba, RgbaImage};

/// White ring outline on black, as line art.
fn ring_image() -> RgbaImage {
    RgbaImage::from_fn(21, 21, |x, y| {
        let (dx, dy) = (x as f32 - 10.0, y as f32 - 10.0);
        let d = (dx * dx + dy * dy).sqrt();
        if (d - 6.0).abs() < 0.5 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

#[test]
fn test_brightness_detection_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ring.png");
    ring_image().save(&path).unwrap();

    let detector = EdgeDetector::new(EdgeDetectionSettings {
        method: EdgeMethod::Brightness,
        sharpen: false,
        ..Default::default()
    });
    let edges = detector.detect_file(&path).unwrap();

    assert_eq!((edges.width(), edges.height()), (21, 21));
    assert!(edges.is_edge(PixelCoordinate::new(16, 10)));
    assert!(edges.is_edge(PixelCoordinate::new(10, 4)));
    assert!(!edges.is_edge(PixelCoordinate::new(10, 10)));
}

#[test]
fn test_sobel_detection_finds_both_sides_of_outline() {
    let detector = EdgeDetector::new(EdgeDetectionSettings {
        sharpen: false,
        ..Default::default()
    });
    let edges = detector.detect(&ring_image()).unwrap();

    assert!(edges.is_edge(PixelCoordinate::new(15, 10)));
    assert!(edges.is_edge(PixelCoordinate::new(17, 10)));
    assert!(!edges.is_edge(PixelCoordinate::new(10, 10)));
    assert!(!edges.is_edge(PixelCoordinate::new(0, 0)));
}

#[test]
fn test_sharpen_keeps_flat_regions() {
    let img = RgbaImage::from_pixel(5, 5, Rgba([40, 80, 120, 255]));
    let sharpened = sharpen(&img);
    assert_eq!(sharpened.get_pixel(2, 2), &Rgba([40, 80, 120, 255]));
}

#[test]
fn test_missing_file_reports_path() {
    let err = load_rgba("/definitely/not/here.png").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.png"));
}
