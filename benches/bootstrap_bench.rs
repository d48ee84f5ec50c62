//! Resampling throughput.

#![allow(unused_crate_dependencies)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use genreboot::*;
use std::hint::black_box;

const RESAMPLES: usize = 10_000;

fn log_sales(n: usize) -> Sample<f64> {
    (0..n).map(|i| ((i % 97) as f64 / 10.0).ln_1p()).collect()
}

/// 1. MEAN BOOTSTRAP (scaling with sample size)
fn bench_resample_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap/mean");
    group.throughput(Throughput::Elements(RESAMPLES as u64));

    for &size in &[100, 1_000, 5_000] {
        let sample = log_sales(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &sample, |b, sample| {
            b.iter(|| black_box(resample_mean(black_box(sample), RESAMPLES, Some(42))))
        });
    }
    group.finish();
}

/// 2. DIFFERENCE BOOTSTRAP (two genres of unequal size)
fn bench_resample_difference(c: &mut Criterion) {
    let a = log_sales(1_500);
    let b = log_sales(400);

    c.bench_function("bootstrap/difference", |bench| {
        bench.iter(|| black_box(resample_difference(black_box(&a), black_box(&b), RESAMPLES, Some(42))))
    });
}

/// 3. PERCENTILE INTERVAL (sorting the replicates)
fn bench_percentile_interval(c: &mut Criterion) {
    let distribution = resample_mean(&log_sales(1_000), RESAMPLES, Some(7));

    if let Ok(distribution) = distribution {
        c.bench_function("interval/percentile_95", |b| {
            b.iter(|| black_box(percentile_interval(black_box(distribution.values()), 0.95)))
        });
    }
}

criterion_group!(
    benches,
    bench_resample_mean,
    bench_resample_difference,
    bench_percentile_interval
);
criterion_main!(benches);
