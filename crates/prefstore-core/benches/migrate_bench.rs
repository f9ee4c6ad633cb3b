//! Criterion benchmarks for the migration engine.
//!
//! Measures a representative upgrade chain so schema-history growth has a
//! known cost at load time.
//!
//! Run with:
//! ```bash
//! cargo bench --package prefstore-core --bench migrate_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prefstore_core::{rename_key, write_version, Document, MigrationPlan};
use serde_json::json;

/// A document with `entries` setting keys, declared at version 1.
fn make_document(entries: usize) -> Document {
    let mut doc = Document::new();
    write_version(&mut doc, 1);
    for i in 0..entries {
        doc.insert(format!("bench:key-{i}"), json!(i as u64));
    }
    doc
}

/// A plan with one rename fixer per version step.
fn make_plan(steps: u32) -> MigrationPlan {
    let mut plan = MigrationPlan::new(steps + 1);
    for v in 1..=steps {
        plan.register(v, rename_key(format!("bench:key-{v}"), format!("bench:renamed-{v}")));
    }
    plan
}

fn bench_migrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("migrate");

    for steps in [1u32, 4, 16] {
        let plan = make_plan(steps);
        let doc = make_document(64);
        group.bench_with_input(BenchmarkId::new("rename_chain", steps), &steps, |b, _| {
            b.iter(|| {
                let mut doc = doc.clone();
                plan.migrate(black_box(&mut doc)).expect("bench migration must succeed");
                doc
            })
        });
    }

    // Baseline: a document already at the target version.
    let plan = make_plan(16);
    let mut up_to_date = make_document(64);
    write_version(&mut up_to_date, 17);
    group.bench_function("up_to_date_noop", |b| {
        b.iter(|| {
            let mut doc = up_to_date.clone();
            plan.migrate(black_box(&mut doc)).expect("noop migration must succeed");
            doc
        })
    });

    group.finish();
}

criterion_group!(benches, bench_migrate);
criterion_main!(benches);
