//! Criterion micro-benchmarks for buffer append, extend, read, and snapshot.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use growbuf_arena::{GrowableBuffer, GrowthConfig};
use growbuf_bench::{build_column, ragged_chunks, random_values};

const N: usize = 100_000;

fn config() -> GrowthConfig {
    GrowthConfig::default()
}

/// Benchmark: 100K single-element appends into a fresh buffer.
fn bench_append_100k(c: &mut Criterion) {
    let values = random_values(42, N);
    c.bench_function("append_100k", |b| {
        b.iter(|| {
            let buffer = build_column(config(), black_box(&values)).unwrap();
            black_box(buffer.length());
        });
    });
}

/// Baseline: the same appends into a `Vec` that reallocates on growth.
fn bench_vec_push_100k(c: &mut Criterion) {
    let values = random_values(42, N);
    c.bench_function("vec_push_100k", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for &x in black_box(&values) {
                v.push(x);
            }
            black_box(v.len());
        });
    });
}

/// Benchmark: ragged batches appended with `extend_from_slice`.
fn bench_extend_ragged(c: &mut Criterion) {
    let chunks = ragged_chunks(7, 5_000, 64);
    c.bench_function("extend_ragged_5k_batches", |b| {
        b.iter(|| {
            let mut buffer = GrowableBuffer::<u32>::empty(config()).unwrap();
            for chunk in black_box(&chunks) {
                buffer.extend_from_slice(chunk).unwrap();
            }
            black_box(buffer.length());
        });
    });
}

/// Benchmark: compacting a 100K-element multi-panel buffer.
fn bench_snapshot_100k(c: &mut Criterion) {
    let values = random_values(42, N);
    c.bench_function("snapshot_100k", |b| {
        b.iter_batched(
            || build_column(config(), &values).unwrap(),
            |mut buffer| {
                let data = buffer.snapshot().unwrap();
                black_box(data.len());
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: positional `get` across every index of a multi-panel buffer.
fn bench_get_scan_100k(c: &mut Criterion) {
    let values = random_values(42, N);
    let buffer = build_column(config(), &values).unwrap();
    c.bench_function("get_scan_100k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..buffer.length() {
                sum = sum.wrapping_add(buffer.get(i));
            }
            black_box(sum);
        });
    });
}

criterion_group!(
    benches,
    bench_append_100k,
    bench_vec_push_100k,
    bench_extend_ragged,
    bench_snapshot_100k,
    bench_get_scan_100k
);
criterion_main!(benches);
