use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rewfile_rs::image_pipeline::compositor::{CompositorConfig, NullSurface, RewBatch};
use rewfile_rs::image_pipeline::{BitsPerPixel, Pixel, RewImage};

fn generate_sprite(width: i32, height: i32) -> RewImage {
    let mut image = RewImage::empty(width, height, BitsPerPixel::Rgba32);
    for y in 0..height {
        for x in 0..width {
            let value = ((x + y) % 256) as u8;
            image.set_pixel(x, y, Pixel::rgba(value, 255 - value, value / 2, value));
        }
    }
    image
}

fn benchmark_draw_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_by_size");

    let sizes = vec![
        (64, 64, "64x64"),
        (256, 256, "256x256"),
        (640, 480, "640x480"),
    ];

    for (width, height, label) in sizes {
        let sprite = generate_sprite(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &sprite, |b, sprite| {
            let config = CompositorConfig::builder().size(640, 480).build();
            let mut batch = match RewBatch::new(config) {
                Ok(batch) => batch,
                Err(e) => panic!("compositor setup failed: {}", e),
            };

            b.iter(|| {
                let _ = batch.begin(Box::new(NullSurface));
                let _ = batch.draw(black_box(sprite), 0, 0);
                let _ = batch.end();
            });
        });
    }

    group.finish();
}

fn benchmark_worker_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_threads");
    let sprite = generate_sprite(640, 480);

    for threads in [1usize, 2, 4, 0] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &sprite, |b, sprite| {
            let config = CompositorConfig::builder()
                .size(640, 480)
                .worker_threads(threads)
                .blend_weight(0.5)
                .build();
            let mut batch = match RewBatch::new(config) {
                Ok(batch) => batch,
                Err(e) => panic!("compositor setup failed: {}", e),
            };

            b.iter(|| {
                let _ = batch.begin(Box::new(NullSurface));
                let _ = batch.draw(black_box(sprite), 0, 0);
                let _ = batch.end();
            });
        });
    }

    group.finish();
}

fn benchmark_rew_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("rew_codec");
    let image = generate_sprite(640, 480);
    let bytes = image.to_bytes();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(bytes.len());
            let _ = black_box(&image).write(&mut output);
        });
    });

    group.bench_function("decode", |b| {
        b.iter(|| {
            let _ = RewImage::from_bytes(black_box(&bytes));
        });
    });

    group.bench_function("padded_pixels_24bpp", |b| {
        let rgb = RewImage::empty(641, 480, BitsPerPixel::Rgb24);
        b.iter(|| black_box(&rgb).padded_pixels());
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_draw_sizes,
    benchmark_worker_threads,
    benchmark_rew_codec
);
criterion_main!(benches);
