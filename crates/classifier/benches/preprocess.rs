use classifier::Preprocessor;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::io::Cursor;

/// Create an encoded PNG with a gradient pattern for benchmarking
fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });

    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

fn benchmark_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    let resolutions = [(640, 480), (1280, 720), (1920, 1080), (3840, 2160)];

    let mut preprocessor = Preprocessor::default();

    for (width, height) in resolutions.iter() {
        let png = create_test_png(*width, *height);

        group.bench_with_input(
            BenchmarkId::new("decode_resize_normalize", format!("{}x{}", width, height)),
            &png,
            |b, png| {
                b.iter(|| {
                    let batch = preprocessor.preprocess(black_box(png)).unwrap();
                    black_box(batch);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_preprocess);
criterion_main!(benches);
