//! # CBC-Casper Validation Benchmarks
//!
//! | Operation | Shape | Expectation |
//! |-----------|-------|-------------|
//! | cbc-01 store | nested inline bodies | linear in body size |
//! | cbc-02 parse_msg | deep interleaved history | linear in history length, no stack growth |
//! | cbc-02 parse_msg | wide justification | linear in fan-out |
//! | cbc-02 parse_msg | memoized reparse | constant |

use std::sync::Arc;
use std::time::Duration;

use cbc_01_message_store::{InMemoryMessageStore, MessageStore};
use cbc_02_validation::ValidationEngine;
use cbc_tests::fixtures::{chain, interleaved_history, wide_justification};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::Estimate;

// ============================================================================
// CBC-01: Message Store
// ============================================================================

fn bench_store_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("cbc-01-message-store");

    for depth in [10usize, 100, 500] {
        let witnesses: Vec<String> = (0..depth).map(|i| format!("witness-{i}")).collect();
        let names: Vec<&str> = witnesses.iter().map(String::as_str).collect();
        let body = chain("Brian", &names);

        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("store_inline_chain", depth), &body, |b, body| {
            b.iter(|| {
                let store = InMemoryMessageStore::new();
                black_box(store.store(body.clone()))
            })
        });
    }

    group.finish();
}

// ============================================================================
// CBC-02: Validation Engine
// ============================================================================

fn bench_validation_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("cbc-02-validation");
    group.measurement_time(Duration::from_secs(10));

    for rounds in [100usize, 1_000, 5_000] {
        let store = Arc::new(InMemoryMessageStore::new());
        let (brian, _) = interleaved_history(store.as_ref(), "Brian", "Sally", rounds);

        group.throughput(Throughput::Elements(2 * rounds as u64));
        group.bench_with_input(BenchmarkId::new("parse_deep_history", rounds), &brian, |b, root| {
            b.iter(|| {
                let engine =
                    ValidationEngine::with_uniform_weights("Test", Estimate::Zero, 0, store.clone());
                black_box(engine.parse_msg(root))
            })
        });
    }

    for width in [10usize, 100, 1_000] {
        let store = Arc::new(InMemoryMessageStore::new());
        let root = wide_justification(store.as_ref(), "Brian", width);

        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("parse_wide_justification", width), &root, |b, root| {
            b.iter(|| {
                let engine =
                    ValidationEngine::with_uniform_weights("Test", Estimate::Zero, 0, store.clone());
                black_box(engine.parse_msg(root))
            })
        });
    }

    let store = Arc::new(InMemoryMessageStore::new());
    let (brian, _) = interleaved_history(store.as_ref(), "Brian", "Sally", 1_000);
    let engine = ValidationEngine::with_uniform_weights("Test", Estimate::Zero, 0, store.clone());
    let _ = engine.parse_msg(&brian);

    group.bench_function("parse_memoized", |b| b.iter(|| black_box(engine.parse_msg(&brian))));

    group.finish();
}

criterion_group!(benches, bench_store_operations, bench_validation_operations);
criterion_main!(benches);
