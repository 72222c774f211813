//! Inference latency benchmarks: single record and batches.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cardiorisk::testing::{reference_pipeline, sample_record};
use cardiorisk::RawRecord;

fn make_batch(size: usize) -> Vec<RawRecord> {
    (0..size)
        .map(|i| sample_record().with("age", 30 + (i as i64 % 45)))
        .collect()
}

fn bench_single_record(c: &mut Criterion) {
    let pipeline = reference_pipeline();
    let record = sample_record();

    c.bench_function("infer/single", |b| {
        b.iter(|| pipeline.infer(black_box(&record)))
    });
}

fn bench_batch_sizes(c: &mut Criterion) {
    let pipeline = reference_pipeline();
    let mut group = c.benchmark_group("infer/batch");

    for size in [10, 100, 1_000, 10_000] {
        let batch = make_batch(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &batch, |b, batch| {
            b.iter(|| pipeline.infer_batch(black_box(batch)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &batch, |b, batch| {
            b.iter(|| pipeline.par_infer_batch(black_box(batch)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_record, bench_batch_sizes);
criterion_main!(benches);
