//! Criterion benchmarks for lanemath
//!
//! Measures the math kernels at every lane width, plus libm for reference.
//! Run with: cargo bench --bench criterion_benches

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanemath::math::{atan, atan2, changesign};
use lanemath::{AlignedBlock, SimdVector, VFloat, VFloat1, VFloat4, VFloat8};
use std::hint::black_box;

const BLOCK_SIZE: usize = 1024;

fn input_block(scale: f32) -> AlignedBlock<BLOCK_SIZE> {
    let mut block = AlignedBlock::<BLOCK_SIZE>::new();
    for i in 0..BLOCK_SIZE {
        block[i] = scale * (i as f32 / BLOCK_SIZE as f32 * 2.0 - 1.0);
    }
    block
}

fn atan_block<V: SimdVector>(input: &AlignedBlock<BLOCK_SIZE>, output: &mut AlignedBlock<BLOCK_SIZE>) {
    for chunk in 0..input.chunk_count::<V>() {
        output.store(chunk, atan(input.load::<V>(chunk)));
    }
}

fn atan2_block<V: SimdVector>(
    ys: &AlignedBlock<BLOCK_SIZE>,
    xs: &AlignedBlock<BLOCK_SIZE>,
    output: &mut AlignedBlock<BLOCK_SIZE>,
) {
    for chunk in 0..ys.chunk_count::<V>() {
        output.store(chunk, atan2(ys.load::<V>(chunk), xs.load::<V>(chunk)));
    }
}

/// Benchmark a single vector call of each kernel
fn bench_single_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_vector");

    let x = VFloat::splat(0.75);
    let y = VFloat::splat(-2.5);

    group.bench_function("changesign", |bencher| {
        bencher.iter(|| black_box(changesign(black_box(x), black_box(y))))
    });

    group.bench_function("atan", |bencher| {
        bencher.iter(|| black_box(atan(black_box(y))))
    });

    group.bench_function("atan2", |bencher| {
        bencher.iter(|| black_box(atan2(black_box(y), black_box(x))))
    });

    group.finish();
}

/// Benchmark atan over a block at every width
fn bench_atan_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("atan_block");
    group.throughput(Throughput::Elements(BLOCK_SIZE as u64));

    let input = input_block(10.0);
    let mut output = AlignedBlock::<BLOCK_SIZE>::new();

    group.bench_with_input(BenchmarkId::new("lanes", 1), &input, |bencher, input| {
        bencher.iter(|| atan_block::<VFloat1>(black_box(input), &mut output))
    });

    group.bench_with_input(BenchmarkId::new("lanes", 4), &input, |bencher, input| {
        bencher.iter(|| atan_block::<VFloat4>(black_box(input), &mut output))
    });

    group.bench_with_input(BenchmarkId::new("lanes", 8), &input, |bencher, input| {
        bencher.iter(|| atan_block::<VFloat8>(black_box(input), &mut output))
    });

    group.bench_with_input(BenchmarkId::new("libm", 1), &input, |bencher, input| {
        bencher.iter(|| {
            for (out, &x) in output.as_mut_slice().iter_mut().zip(black_box(input).as_slice()) {
                *out = libm::atanf(x);
            }
        })
    });

    group.finish();
}

/// Benchmark atan2 over a block at every width
fn bench_atan2_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("atan2_block");
    group.throughput(Throughput::Elements(BLOCK_SIZE as u64));

    let ys = input_block(3.0);
    let xs = input_block(-5.0);
    let mut output = AlignedBlock::<BLOCK_SIZE>::new();

    group.bench_function(BenchmarkId::new("lanes", 1), |bencher| {
        bencher.iter(|| atan2_block::<VFloat1>(black_box(&ys), black_box(&xs), &mut output))
    });

    group.bench_function(BenchmarkId::new("lanes", 4), |bencher| {
        bencher.iter(|| atan2_block::<VFloat4>(black_box(&ys), black_box(&xs), &mut output))
    });

    group.bench_function(BenchmarkId::new("lanes", 8), |bencher| {
        bencher.iter(|| atan2_block::<VFloat8>(black_box(&ys), black_box(&xs), &mut output))
    });

    group.bench_function(BenchmarkId::new("libm", 1), |bencher| {
        bencher.iter(|| {
            let pairs = black_box(&ys).as_slice().iter().zip(black_box(&xs).as_slice());
            for (out, (&y, &x)) in output.as_mut_slice().iter_mut().zip(pairs) {
                *out = libm::atan2f(y, x);
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_vector,
    bench_atan_block,
    bench_atan2_block,
);

criterion_main!(benches);
