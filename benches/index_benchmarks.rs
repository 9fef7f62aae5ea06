use std::collections::BTreeMap;

use bplus_index::PositionIndex;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

const N: usize = 10_000;

/// Key looked up and removed by the single-key benchmarks.
const PROBE: i64 = 1188;

const ORDERS: [usize; 4] = [4, 16, 64, 128];

// ─── Helper functions to generate datasets ──────────────────────────────────

/// A dataset column with repeated values, like a real CSV column of readings.
fn dataset(n: usize) -> Vec<i64> {
    // Use a simple LCG for a deterministic pseudo-random sequence.
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push(((x >> 33) % 4_096) as i64);
    }
    values[n / 2] = PROBE;
    values
}

fn btree_model(values: &[i64]) -> BTreeMap<i64, Vec<usize>> {
    let mut model: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (position, &value) in values.iter().enumerate() {
        model.entry(value).or_default().push(position);
    }
    model
}

// ─── Index Benchmarks ───────────────────────────────────────────────────────

fn bench_build_index(c: &mut Criterion) {
    let values = dataset(N);
    let mut group = c.benchmark_group("build_index");

    for order in ORDERS {
        group.bench_function(BenchmarkId::new("PositionIndex", order), |b| {
            b.iter(|| PositionIndex::from_values(order, values.iter().copied()).unwrap());
        });
    }

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| btree_model(&values));
    });

    group.finish();
}

fn bench_get_index_position(c: &mut Criterion) {
    let values = dataset(N);
    let mut group = c.benchmark_group("get_index_position");

    for order in ORDERS {
        let index = PositionIndex::from_values(order, values.iter().copied()).unwrap();
        group.bench_function(BenchmarkId::new("PositionIndex", order), |b| {
            b.iter(|| index.get_index_position(&PROBE));
        });
    }

    let model = btree_model(&values);
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| model.get(&PROBE).cloned());
    });

    group.finish();
}

fn bench_get_range(c: &mut Criterion) {
    let values = dataset(N);
    let mut group = c.benchmark_group("get_range");

    for order in ORDERS {
        let index = PositionIndex::from_values(order, values.iter().copied()).unwrap();
        group.bench_function(BenchmarkId::new("PositionIndex", order), |b| {
            b.iter(|| index.get_range(&1_000, &1_400));
        });
    }

    let model = btree_model(&values);
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| model.range(1_000..=1_400).flat_map(|(_, p)| p.iter().copied()).collect::<Vec<_>>());
    });

    group.finish();
}

fn bench_remove_index(c: &mut Criterion) {
    let values = dataset(N);
    let mut group = c.benchmark_group("remove_index");

    for order in ORDERS {
        group.bench_function(BenchmarkId::new("PositionIndex", order), |b| {
            b.iter_batched_ref(
                || PositionIndex::from_values(order, values.iter().copied()).unwrap(),
                |index| index.remove_index(&PROBE).unwrap(),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(build_benches, bench_build_index);

criterion_group!(query_benches, bench_get_index_position, bench_get_range);

criterion_group!(remove_benches, bench_remove_index);

criterion_main!(build_benches, query_benches, remove_benches);
