use criterion::{criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma};
use lorde::{
    auto_canny, similarity_map, Calibration, DepthEstimator, EdgeConfig, Frame, HsvColor,
    MatchConfig, MultiScaleMatcher, PipelineConfig, PixelBox, Region, Template,
};
use std::hint::black_box;

const WIDTH: usize = 160;
const HEIGHT: usize = 120;

fn make_frame() -> Frame {
    let mut color = Vec::with_capacity(WIDTH * HEIGHT * 3);
    let mut depth = Vec::with_capacity(WIDTH * HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let near = (20..44).contains(&x) && (30..54).contains(&y);
            let far = (110..122).contains(&x) && (75..87).contains(&y);
            if near || far {
                color.extend_from_slice(&[220, 30, 25]);
            } else {
                let shade = ((x * 7) ^ (y * 3)) as u8 & 0x3F;
                color.extend_from_slice(&[shade, 90 + shade, 160]);
            }
            depth.push(if x < WIDTH / 2 { 1200 } else { 0 });
        }
    }
    Frame::new(WIDTH, HEIGHT, color, depth).unwrap()
}

fn bench_stages(c: &mut Criterion) {
    let frame = make_frame();
    let similarity = similarity_map(&frame, HsvColor::RED).unwrap();
    let roi = PixelBox::new(16, 26, 48, 58).unwrap();
    let template = Template::from_region(&similarity, &roi, &EdgeConfig::default()).unwrap();

    c.bench_function("similarity_map_160x120", |b| {
        b.iter(|| black_box(similarity_map(&frame, HsvColor::RED).unwrap()));
    });

    c.bench_function("auto_canny_160x120", |b| {
        b.iter(|| black_box(auto_canny(&similarity, &EdgeConfig::default())));
    });

    let matcher = MultiScaleMatcher::new(template).with_config(MatchConfig {
        max_scale: 2.0,
        num_scales: 6,
        ..MatchConfig::default()
    });
    c.bench_function("multiscale_match_6_scales", |b| {
        b.iter(|| black_box(matcher.match_image(&similarity).unwrap()));
    });

    let blank = GrayImage::new(WIDTH as u32, HEIGHT as u32);
    c.bench_function("multiscale_match_flat_image", |b| {
        b.iter(|| black_box(matcher.match_image(&blank).is_err()));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let frame = make_frame();
    let estimator = DepthEstimator::new(Calibration::new(0.1491, 0.001).unwrap()).with_config(
        PipelineConfig {
            matching: MatchConfig {
                max_scale: 2.5,
                num_scales: 6,
                ..MatchConfig::default()
            },
            ..PipelineConfig::default()
        },
    );
    let region = Region::new(16, 26, 48, 58);

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.bench_function("estimate_160x120", |b| {
        b.iter(|| black_box(estimator.estimate(&frame, region).unwrap()));
    });
    group.finish();
}

/// Similarity-like map at the RealSense color resolution with a near and a
/// far instance of the same square.
fn vga_map() -> GrayImage {
    GrayImage::from_fn(640, 480, |x, y| {
        let near = (200..280).contains(&x) && (180..256).contains(&y);
        let far = (450..490).contains(&x) && (300..338).contains(&y);
        Luma([if near || far { 255 } else { ((x ^ y) & 0x0F) as u8 }])
    })
}

fn bench_default_sweep(c: &mut Criterion) {
    let map = vga_map();
    let roi = PixelBox::new(192, 172, 288, 264).unwrap();
    let template = Template::from_region(&map, &roi, &EdgeConfig::default()).unwrap();
    let matcher = MultiScaleMatcher::new(template).with_config(MatchConfig::default());

    let mut group = c.benchmark_group("default_sweep");
    group.sample_size(10);
    group.bench_function("multiscale_match_640x480", |b| {
        b.iter(|| black_box(matcher.match_image(&map).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_stages, bench_pipeline, bench_default_sweep);
criterion_main!(benches);
