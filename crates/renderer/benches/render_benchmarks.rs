//! Benchmarks for the renderer crate - poster composition and PNG encoding.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgba, RgbaImage};
use renderer::{png, AssetConfig, PosterRenderer, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Canvas with a dimmed gradient background, like a real poster.
fn generate_poster_like_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let t = y as f32 / height as f32;
        Rgba([
            (20.0 + t * 150.0) as u8,
            (40.0 + (x % 64) as f32) as u8,
            (140.0 - t * 100.0) as u8,
            255,
        ])
    })
}

/// Canvas with a handful of flat colours (indexed path).
fn generate_flat_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (y / 76) % 2 == 0 {
            Rgba([175, 175, 175, 255])
        } else if x % 40 < 20 {
            Rgba([147, 147, 147, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");
    group.throughput(Throughput::Bytes((CANVAS_WIDTH * CANVAS_HEIGHT * 4) as u64));

    let cases = [
        ("flat", generate_flat_image(CANVAS_WIDTH, CANVAS_HEIGHT)),
        ("gradient", generate_poster_like_image(CANVAS_WIDTH, CANVAS_HEIGHT)),
    ];

    for (name, img) in &cases {
        group.bench_with_input(BenchmarkId::new("auto", name), img, |b, img| {
            b.iter(|| png::encode_png(black_box(img)));
        });
    }

    group.finish();
}

fn bench_full_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("poster_render");
    let dir = tempfile::tempdir().expect("tempdir");

    let background = dir.path().join("bg.png");
    generate_poster_like_image(1080, 1920)
        .save(&background)
        .expect("write background");

    let record = test_utils::beijing();
    let font = test_utils::find_test_font().unwrap_or_else(|| dir.path().join("missing.ttf"));

    for capacity in [0usize, 4] {
        let renderer = PosterRenderer::new(
            AssetConfig::new(&background, &font).with_cache_capacity(capacity),
        )
        .expect("renderer");
        let label = if capacity == 0 { "uncached" } else { "cached" };

        group.bench_function(BenchmarkId::new("render", label), |b| {
            b.iter(|| renderer.render(black_box(&record)));
        });
    }

    let fallback = PosterRenderer::new(AssetConfig::new(
        dir.path().join("missing.png"),
        dir.path().join("missing.ttf"),
    ))
    .expect("renderer");
    group.bench_function("render_fallback", |b| {
        b.iter(|| fallback.render(black_box(&record)));
    });

    group.finish();
}

criterion_group!(benches, bench_png_encoding, bench_full_render);
criterion_main!(benches);
