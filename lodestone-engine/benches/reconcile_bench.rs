//! Benchmarks for reconciliation passes over an in-memory store.
//!
//! Three pass shapes are measured:
//! - First pass: every definition needs a create
//! - Steady state: nothing drifted, nothing written
//! - Repair pass: half the records have drifted fields

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lodestone_engine::{Reconciler, Registry};
use lodestone_model::{Definition, DefinitionSet};
use lodestone_store::{ContentStore, MemoryStore, RecordFilter};
use lodestone_types::SLUG_ATTR;

/// Create a definition set with `count` definitions.
fn make_set(count: usize) -> DefinitionSet {
    let mut set = DefinitionSet::new("doc");
    for i in 0..count {
        set = set.definition(
            Definition::new(format!("page-{i}"), format!("Page {i}"))
                .body("Benchmark body content.")
                .attr("nav_order", i as i64),
        );
    }
    set
}

/// Create a reconciler over a fresh in-memory store.
fn make_reconciler(count: usize) -> (Arc<MemoryStore>, Reconciler) {
    let mut registry = Registry::new();
    registry.register(make_set(count)).unwrap();
    let store = Arc::new(MemoryStore::new());
    let reconciler = Reconciler::new(store.clone(), registry);
    (store, reconciler)
}

fn bench_first_pass(c: &mut Criterion) {
    c.bench_function("reconcile_first_pass_100", |b| {
        b.iter_batched(
            || make_reconciler(100).1,
            |reconciler| black_box(reconciler.reconcile()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_steady_state(c: &mut Criterion) {
    let (_store, reconciler) = make_reconciler(100);
    reconciler.reconcile();

    c.bench_function("reconcile_steady_state_100", |b| {
        b.iter(|| black_box(reconciler.reconcile()))
    });
}

fn bench_repair_pass(c: &mut Criterion) {
    c.bench_function("reconcile_repair_pass_100_half_drifted", |b| {
        b.iter_batched(
            || {
                let (store, reconciler) = make_reconciler(100);
                reconciler.reconcile();
                let ids = store
                    .query("doc", &RecordFilter::attr_exists(SLUG_ATTR), true)
                    .unwrap();
                for id in ids.iter().step_by(2) {
                    let record = store.get(*id).unwrap().unwrap();
                    let mut fields = record.fields;
                    fields.title = "Drifted".to_string();
                    store.update(*id, &fields).unwrap();
                }
                reconciler
            },
            |reconciler| black_box(reconciler.reconcile()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_first_pass,
    bench_steady_state,
    bench_repair_pass
);
criterion_main!(benches);
