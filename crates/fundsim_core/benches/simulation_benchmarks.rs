//! Criterion benchmarks for fundsim_core simulation
//!
//! Run with: cargo bench -p fundsim_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fundsim_core::{CapitalPlan, PlanBuilder, StageTable, monte_carlo_simulate, simulate_firm};

fn default_plan(table: &StageTable) -> CapitalPlan {
    PlanBuilder::new()
        .fund_size(200.0)
        .primary_capital(180.0)
        .follow_on_capital(20.0)
        .entry_stage("Pre-seed", 0.3, 1.5)
        .entry_stage("Seed", 0.7, 4.0)
        .pro_rata_at_or_below("Series A")
        .build(table)
        .unwrap()
}

fn bench_single_firm(c: &mut Criterion) {
    let table = StageTable::default_market();
    let plan = default_plan(&table);

    c.bench_function("single_firm_full_lifespan", |b| {
        b.iter(|| simulate_firm(black_box(&plan), black_box(&table), black_box(42)))
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    let table = StageTable::default_market();
    let plan = default_plan(&table);

    for scenarios in [100, 500, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("scenarios", scenarios),
            scenarios,
            |b, &n| {
                b.iter(|| {
                    monte_carlo_simulate(black_box(&plan), black_box(&table), black_box(n), 42)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_firm, bench_monte_carlo);
criterion_main!(benches);
