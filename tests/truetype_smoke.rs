#![cfg(feature = "truetype")]

use std::path::{Path, PathBuf};

use textdots::truetype::TrueTypeSurface;
use textdots::{pixelate_with, RasterSurface, RenderRequest};

const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

fn system_font() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("TEXTDOTS_TEST_FONT") {
        return Some(PathBuf::from(p));
    }
    CANDIDATES.iter().map(Path::new).find(|p| p.exists()).map(Path::to_path_buf)
}

#[test]
fn truetype_glyph_is_centered() {
    let Some(path) = system_font() else {
        println!("No system font found; set TEXTDOTS_TEST_FONT to run. Skipping.");
        return;
    };
    let mut surface = TrueTypeSurface::from_path(&path).expect("load font");
    let cloud = pixelate_with(&mut surface, &RenderRequest::new("A", 150)).expect("pixelate");

    assert!(surface.pixels().is_none());
    assert!(!cloud.points.is_empty());
    assert_eq!(cloud.frequency(), 7);
    let min_x = cloud.points.iter().map(|p| p.x).min().unwrap();
    let max_x = cloud.points.iter().map(|p| p.x).max().unwrap();
    let center = (min_x + max_x) as f64 / 2.0;
    assert!((center - 75.0).abs() <= 20.0, "center {}", center);
    for p in &cloud.points {
        assert!(p.x < cloud.width && p.y < cloud.height);
    }
}

#[test]
fn truetype_whitespace_is_a_measurement_error() {
    let Some(path) = system_font() else {
        println!("No system font found; set TEXTDOTS_TEST_FONT to run. Skipping.");
        return;
    };
    let mut surface = TrueTypeSurface::from_path(&path).expect("load font");
    let err = pixelate_with(&mut surface, &RenderRequest::new("   ", 150)).unwrap_err();
    assert!(err.is_measurement());
}

#[test]
fn truetype_is_deterministic() {
    let Some(path) = system_font() else {
        println!("No system font found; set TEXTDOTS_TEST_FONT to run. Skipping.");
        return;
    };
    let mut surface = TrueTypeSurface::from_path(&path).expect("load font");
    let req = RenderRequest::new("joe thel", 300).with_resolution(10);
    let a = pixelate_with(&mut surface, &req).unwrap();
    let b = pixelate_with(&mut surface, &req).unwrap();
    assert_eq!(a, b);
}
