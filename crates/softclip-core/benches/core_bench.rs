//! Criterion benchmarks for the softclip signal path
//!
//! Run with: cargo bench -p softclip-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use softclip_core::{AudioBlock, ParamId, ParameterSet, SignalProcessor, soft_clip};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_transfer(c: &mut Criterion) {
    let input = generate_test_signal(1024);
    c.bench_function("soft_clip/1024", |b| {
        b.iter(|| {
            for &x in &input {
                black_box(soft_clip(black_box(x), black_box(x * 2.0), black_box(0.3)));
            }
        });
    });
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("SignalProcessor");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("stereo_settled", block_size),
            &block_size,
            |b, &size| {
                let mut p = SignalProcessor::new();
                p.prepare(SAMPLE_RATE, size, 2).unwrap();
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    let mut channels = [&mut left[..], &mut right[..]];
                    p.process(&mut AudioBlock::new(&mut channels)).unwrap();
                    black_box(&left);
                });
            },
        );

        // Worst case: a new target every block keeps all four ramps running.
        group.bench_with_input(
            BenchmarkId::new("stereo_automated", block_size),
            &block_size,
            |b, &size| {
                let mut p = SignalProcessor::new();
                p.prepare(SAMPLE_RATE, size, 2).unwrap();
                let params = p.params();
                let mut left = input.clone();
                let mut right = input.clone();
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    let t = if flip { 1.0 } else { 0.0 };
                    params.set(ParamId::Input, -6.0 + 12.0 * t);
                    params.set(ParamId::Tone, 0.1 + 0.4 * t);
                    params.set(ParamId::Mix, 0.5 + 0.5 * t);
                    params.set(ParamId::Output, -3.0 * t);
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    let mut channels = [&mut left[..], &mut right[..]];
                    p.process(&mut AudioBlock::new(&mut channels)).unwrap();
                    black_box(&left);
                });
            },
        );
    }

    group.finish();
}

fn bench_params(c: &mut Criterion) {
    let params = ParameterSet::new();
    c.bench_function("ParameterSet/snapshot", |b| {
        b.iter(|| black_box(params.snapshot()));
    });
    c.bench_function("ParameterSet/set", |b| {
        b.iter(|| params.set(black_box(ParamId::Mix), black_box(0.5)));
    });
}

criterion_group!(benches, bench_transfer, bench_process, bench_params);
criterion_main!(benches);
