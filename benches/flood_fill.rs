use criterion::{Criterion, black_box, criterion_group, criterion_main};
use odontogram::detector::flood_fill::{Connectivity, find_bright_clusters};
use odontogram::utils::binarization::threshold_bright;
use odontogram::{DetectionParams, detect_from_grayscale};

/// Synthetic arch: two rows of bright blocks on a dark background
fn synthetic_arch(width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![30u8; width * height];
    let block = (width / 20).max(2);
    for row in [height / 4, height * 3 / 4] {
        for i in 0..16 {
            let x0 = block / 2 + i * (block + block / 4);
            for y in row..(row + block).min(height) {
                for x in x0..(x0 + block).min(width) {
                    gray[y * width + x] = 220;
                }
            }
        }
    }
    gray
}

fn bench_threshold_640x480(c: &mut Criterion) {
    let gray = synthetic_arch(640, 480);
    c.bench_function("threshold_bright_640x480", |b| {
        b.iter(|| threshold_bright(black_box(&gray), black_box(640), black_box(480), 180))
    });
}

fn bench_flood_fill_four(c: &mut Criterion) {
    let gray = synthetic_arch(640, 480);
    let mask = threshold_bright(&gray, 640, 480, 180);
    c.bench_function("flood_fill_4_640x480", |b| {
        b.iter(|| find_bright_clusters(black_box(&mask), Connectivity::Four))
    });
}

fn bench_flood_fill_eight(c: &mut Criterion) {
    let gray = synthetic_arch(640, 480);
    let mask = threshold_bright(&gray, 640, 480, 180);
    c.bench_function("flood_fill_8_640x480", |b| {
        b.iter(|| find_bright_clusters(black_box(&mask), Connectivity::Eight))
    });
}

fn bench_flood_fill_all_bright(c: &mut Criterion) {
    // Miscalibrated threshold: one cluster covering the image
    let gray = vec![255u8; 1024 * 768];
    let mask = threshold_bright(&gray, 1024, 768, 0);
    c.bench_function("flood_fill_all_bright_1024x768", |b| {
        b.iter(|| find_bright_clusters(black_box(&mask), Connectivity::Four))
    });
}

fn bench_detect_end_to_end(c: &mut Criterion) {
    let gray = synthetic_arch(1280, 720);
    let params = DetectionParams {
        max_area: 10_000,
        ..Default::default()
    };
    c.bench_function("detect_from_grayscale_1280x720", |b| {
        b.iter(|| detect_from_grayscale(black_box(&gray), 1280, 720, &params))
    });
}

criterion_group!(
    benches,
    bench_threshold_640x480,
    bench_flood_fill_four,
    bench_flood_fill_eight,
    bench_flood_fill_all_bright,
    bench_detect_end_to_end
);
criterion_main!(benches);
