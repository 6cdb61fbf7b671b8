//! Benchmark for chaining on Outcome, MonadicList and OutcomeList.
//!
//! Measures the cost of the success path against the capture path, where a
//! diagnostic (including its rendered value) is built.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use monadic::outcome::Outcome;
use monadic::sequence::{MonadicList, OutcomeList};
use std::hint::black_box;

fn increment(value: i64) -> Result<i64, String> {
    value.checked_add(1).ok_or_else(|| "overflow".to_string())
}

fn reject_odd(value: i64) -> Result<i64, String> {
    if value % 2 == 0 {
        Ok(value)
    } else {
        Err(format!("{value} is odd"))
    }
}

// =============================================================================
// Outcome Benchmarks
// =============================================================================

fn benchmark_outcome_bind_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("outcome_bind_chain");

    for depth in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::new("success", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut outcome = Outcome::success(0_i64);
                for _ in 0..depth {
                    outcome = outcome.bind(increment);
                }
                black_box(outcome)
            });
        });
    }

    group.bench_function("capture_failure", |bencher| {
        bencher.iter(|| black_box(Outcome::success(black_box(1_i64)).bind(reject_odd)));
    });

    group.bench_function("short_circuit", |bencher| {
        let failed = Outcome::success(1_i64).bind(reject_odd);
        bencher.iter(|| {
            let mut outcome = failed.clone();
            for _ in 0..100 {
                outcome = outcome.bind(increment);
            }
            black_box(outcome)
        });
    });

    group.finish();
}

// =============================================================================
// List Benchmarks
// =============================================================================

fn benchmark_list_bind(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("list_bind");

    for size in [100, 1000, 10000] {
        let values: Vec<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("monadic_list", size), &values, |bencher, values| {
            bencher.iter(|| black_box(MonadicList::new(values.iter().copied()).bind(increment)));
        });

        group.bench_with_input(BenchmarkId::new("outcome_list", size), &values, |bencher, values| {
            bencher.iter(|| black_box(OutcomeList::from_values(values.iter().copied()).bind(increment)));
        });

        group.bench_with_input(
            BenchmarkId::new("outcome_list_half_failing", size),
            &values,
            |bencher, values| {
                bencher.iter(|| black_box(OutcomeList::from_values(values.iter().copied()).bind(reject_odd)));
            },
        );
    }

    group.finish();
}

fn benchmark_list_filter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("list_filter");

    for size in [100, 1000, 10000] {
        let values: Vec<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("monadic_list", size), &values, |bencher, values| {
            bencher.iter(|| black_box(MonadicList::new(values.iter().copied()).filter(|value| value % 3 == 0)));
        });

        group.bench_with_input(BenchmarkId::new("outcome_list", size), &values, |bencher, values| {
            bencher.iter(|| {
                black_box(OutcomeList::from_values(values.iter().copied()).filter(|value| value % 3 == 0))
            });
        });
    }

    group.finish();
}

fn benchmark_list_bind_and_flatten(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("list_bind_and_flatten");

    let values: Vec<i64> = (0..1000).collect();
    let pair = |value: i64| Ok::<_, String>([value, value * value]);

    group.bench_function("monadic_list", |bencher| {
        bencher.iter(|| black_box(MonadicList::new(values.iter().copied()).bind_and_flatten(pair)));
    });

    group.bench_function("outcome_list_fused", |bencher| {
        bencher.iter(|| black_box(OutcomeList::from_values(values.iter().copied()).bind_and_flatten(pair)));
    });

    group.bench_function("outcome_list_bind_then_flatten", |bencher| {
        bencher.iter(|| {
            black_box(
                OutcomeList::from_values(values.iter().copied())
                    .map(|value| [value, value * value])
                    .flatten(),
            )
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_outcome_bind_chain,
    benchmark_list_bind,
    benchmark_list_filter,
    benchmark_list_bind_and_flatten
);

criterion_main!(benches);
