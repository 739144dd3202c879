//! Benchmarks for the JPEG block pipeline and full encodes.

use cjpeg::color::bgr_block_to_ycc;
use cjpeg::jpeg::blocks::PaddedImage;
use cjpeg::jpeg::dct::forward_dct;
use cjpeg::jpeg::quantize::{quantize_block, QuantizationTables};
use cjpeg::jpeg::{Encoder, JpegOptions};
use cjpeg::ColorType;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn gradient_image(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width) as u8;
            let g = ((y * 255) / height) as u8;
            let b = (((x + y) * 127) / (width + height)) as u8;
            pixels.extend_from_slice(&[b, g, r]);
        }
    }
    pixels
}

fn noise_image(width: u32, height: u32, mut seed: u32) -> Vec<u8> {
    let len = (width * height * 3) as usize;
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        out.push((seed >> 16) as u8);
    }
    out
}

fn bench_block_stages(c: &mut Criterion) {
    let pixels = gradient_image(8, 8);
    let image = PaddedImage::new(&pixels, 8, 8, ColorType::Bgr).unwrap();
    let block = image.block_at(0, 0).unwrap();
    let tables = QuantizationTables::default();
    let unit = bgr_block_to_ycc(&block);
    let coeffs = forward_dct(&unit.y);

    let mut group = c.benchmark_group("block_stages");
    group.bench_function("color_convert", |b| {
        b.iter(|| black_box(bgr_block_to_ycc(black_box(&block))))
    });
    group.bench_function("forward_dct", |b| {
        b.iter(|| black_box(forward_dct(black_box(&unit.y))))
    });
    group.bench_function("quantize", |b| {
        b.iter(|| {
            black_box(quantize_block(
                black_box(&coeffs),
                &tables.luminance_divisors,
            ))
        })
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let encoder = Encoder::new(JpegOptions::default()).unwrap();
    let mut group = c.benchmark_group("jpeg_encode");

    for &(width, height) in &[(256u32, 256u32), (1024, 768)] {
        let label = format!("{width}x{height}");
        group.throughput(Throughput::Bytes((width * height * 3) as u64));

        let gradient = PaddedImage::new(
            &gradient_image(width, height),
            width,
            height,
            ColorType::Bgr,
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::new("gradient", &label), &gradient, |b, image| {
            let mut output = Vec::new();
            b.iter(|| {
                output.clear();
                encoder.encode_image(&mut output, black_box(image)).unwrap();
            })
        });

        let noise = PaddedImage::new(
            &noise_image(width, height, 0x1234_5678),
            width,
            height,
            ColorType::Bgr,
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::new("noise", &label), &noise, |b, image| {
            let mut output = Vec::new();
            b.iter(|| {
                output.clear();
                encoder.encode_image(&mut output, black_box(image)).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block_stages, bench_encode);
criterion_main!(benches);
