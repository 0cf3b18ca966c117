//! Micro-operation benchmarks for LookupTable.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency for fetch hits (in insertion and shuffled
//! order) and misses, stores that update or insert (including growth), and
//! delete/reinsert churn.

use std::hint::black_box;
use std::time::Instant;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lookupkit::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const ENTRIES: usize = 4_096;
const OPS: u64 = 100_000;

fn populated() -> (State, LookupTable, Vec<Symbol>) {
    let mut state = State::new();
    let mut table = LookupTable::new(&mut state, 0);
    let keys: Vec<Symbol> = (0..ENTRIES).map(|i| state.intern(&format!("k{i}"))).collect();
    for (i, key) in keys.iter().enumerate() {
        table.store(&mut state, *key, i as i64).unwrap();
    }
    (state, table, keys)
}

// ============================================================================
// Fetch Latency (ns/op)
// ============================================================================

fn bench_fetch(c: &mut Criterion) {
    let mut group = c.benchmark_group("fetch_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("hit_symbol", |b| {
        b.iter_custom(|iters| {
            let (mut state, table, keys) = populated();
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS as usize {
                    black_box(table.fetch(&mut state, keys[i % ENTRIES]).ok());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("hit_shuffled", |b| {
        b.iter_custom(|iters| {
            let (mut state, table, mut keys) = populated();
            keys.shuffle(&mut StdRng::seed_from_u64(42));
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS as usize {
                    black_box(table.fetch(&mut state, keys[i % ENTRIES]).ok());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("hit_text", |b| {
        b.iter_custom(|iters| {
            let (mut state, table, _) = populated();
            let names: Vec<Value> = (0..ENTRIES).map(|i| Value::from(format!("k{i}"))).collect();
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS as usize {
                    black_box(table.fetch(&mut state, names[i % ENTRIES].clone()).ok());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("miss", |b| {
        b.iter_custom(|iters| {
            let (mut state, table, _) = populated();
            let absent: Vec<Symbol> =
                (0..ENTRIES).map(|i| state.intern(&format!("x{i}"))).collect();
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS as usize {
                    black_box(table.fetch(&mut state, absent[i % ENTRIES]).ok());
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Store Latency (ns/op)
// ============================================================================

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("update", |b| {
        b.iter_custom(|iters| {
            let (mut state, mut table, keys) = populated();
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS as usize {
                    black_box(table.store(&mut state, keys[i % ENTRIES], i as i64).ok());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("insert_with_growth", |b| {
        b.iter_custom(|iters| {
            let mut state = State::new();
            let keys: Vec<Symbol> = (0..OPS).map(|i| state.intern(&format!("k{i}"))).collect();
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut table = LookupTable::new(&mut state, 0);
                let start = Instant::now();
                for (i, key) in keys.iter().enumerate() {
                    black_box(table.store(&mut state, *key, i as i64).ok());
                }
                total += start.elapsed();
                state.heap.collect(&[]);
            }
            total
        })
    });

    group.finish();
}

// ============================================================================
// Delete / Reinsert Churn (ns/op)
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("delete_reinsert", |b| {
        b.iter_custom(|iters| {
            let (mut state, mut table, keys) = populated();
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let start = Instant::now();
                for i in 0..OPS as usize {
                    let key = keys[i % ENTRIES];
                    black_box(table.delete(&mut state, key).ok());
                    black_box(table.store(&mut state, key, i as i64).ok());
                }
                total += start.elapsed();
                state.heap.collect(&[table.root()]);
            }
            total
        })
    });

    group.finish();
}

criterion_group!(benches, bench_fetch, bench_store, bench_churn);
criterion_main!(benches);
