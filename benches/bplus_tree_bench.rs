//! Insert and search throughput for the B+ tree at a few orders.

use std::hint::black_box;

use bplus_index::{BPlusTree, IndexConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const N: u64 = 10_000;

/// Deterministic scatter of 0..N so inserts don't arrive sorted.
fn scattered_keys() -> Vec<u64> {
    (0..N).map(|i| (i * 7_919) % N).collect()
}

fn build(order: usize, keys: &[u64]) -> BPlusTree<u64, u64> {
    let mut tree = BPlusTree::with_config(IndexConfig::new(order).unwrap());
    for &key in keys {
        tree.insert(key, key);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let keys = scattered_keys();
    let mut group = c.benchmark_group("insert");

    for order in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, &order| {
            b.iter(|| build(order, black_box(&keys)));
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let keys = scattered_keys();
    let mut group = c.benchmark_group("search");

    for order in [4, 16, 64] {
        let tree = build(order, &keys);
        group.bench_with_input(BenchmarkId::from_parameter(order), &tree, |b, tree| {
            b.iter(|| {
                for key in 0..N {
                    black_box(tree.search(&key));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_search);
criterion_main!(benches);
