use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Benchmarks for the text-to-points pipeline. Run with:
//    cargo bench

use textdots::bitmap::BitmapSurface;
use textdots::rendering::{sample_points, sampling_frequency};
use textdots::{pixelate, pixelate_with, RasterSurface, RenderRequest};

fn bench_pixelate_resolutions(c: &mut Criterion) {
    for resolution in [2u32, 3, 10, 20] {
        let req = RenderRequest::new("joe thel", 150).with_resolution(resolution);
        c.bench_function(&format!("pixelate_joe_thel_r{}", resolution), |b| {
            b.iter(|| pixelate(black_box(&req)).unwrap())
        });
    }
}

fn bench_wide_canvas(c: &mut Criterion) {
    let req = RenderRequest::new("Hello, World!", 1920).with_resolution(3);
    let mut surface = BitmapSurface::new();
    c.bench_function("pixelate_wide_canvas_reused_surface", |b| {
        b.iter(|| pixelate_with(&mut surface, black_box(&req)).unwrap())
    });
}

fn bench_sampling_only(c: &mut Criterion) {
    // Rasterize once, then measure the grid walk alone at the densest step.
    let mut surface = BitmapSurface::new();
    let font = textdots::FontSpec::default();
    surface.create_buffer(1920, 320).unwrap();
    surface.draw_text_centered("Hello, World!", &font, 220).unwrap();
    let buffer = surface.pixels().unwrap().clone();
    let freq = sampling_frequency(1920, 1920);

    c.bench_function("sample_points_freq_1", |b| {
        b.iter(|| sample_points(black_box(&buffer), freq))
    });
}

criterion_group!(
    benches,
    bench_pixelate_resolutions,
    bench_wide_canvas,
    bench_sampling_only
);
criterion_main!(benches);
