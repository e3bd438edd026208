//! Benchmarks: variable declaration and sub-circuit registration.
//!
//! Parameterized by the number of declared variables and by how often a
//! repeated block is looked up in the registry.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gkr_circuit::{CompileConfig, Root, SubCircuitId, SubCircuitLookup};
use p3_baby_bear::BabyBear;
use p3_field::PrimeField64;

type F = BabyBear;

fn new_root(capacity: usize) -> Root<F> {
    Root::new(F::ORDER_U64, CompileConfig::new().with_capacity(capacity)).unwrap()
}

/// Declares `n` root inputs, one in four of them public.
fn declare_inputs(n: usize, capacity: usize) -> Root<F> {
    let mut root = new_root(capacity);
    for i in 0..n {
        if i % 4 == 0 {
            black_box(root.public_variable("p").unwrap());
        } else {
            black_box(root.secret_variable("s").unwrap());
        }
    }
    root
}

/// Describes `calls` uses of `distinct` repeated blocks, each with `width` inputs.
fn repeated_blocks(calls: usize, distinct: u64, width: usize) -> Root<F> {
    let mut root = new_root(0);
    for i in 0..calls as u64 {
        let key = SubCircuitId(1 + i % distinct);
        if let SubCircuitLookup::Created(id) = root.get_or_create_sub_circuit(key).unwrap() {
            for _ in 0..width {
                root.sub_circuit_input(id, "in").unwrap();
            }
            let out = root.sub_circuit_internal(id, "out").unwrap();
            root.mark_output(id, out.as_variable().unwrap()).unwrap();
        }
    }
    root
}

fn bench_declare(c: &mut Criterion) {
    let mut group = c.benchmark_group("declare");
    for n in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("no_capacity", n), &n, |b, &n| {
            b.iter(|| black_box(declare_inputs(n, 0).finish()));
        });
        group.bench_with_input(BenchmarkId::new("with_capacity", n), &n, |b, &n| {
            b.iter(|| black_box(declare_inputs(n, n).finish()));
        });
    }
    group.finish();
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    for calls in [1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("reuse_16", calls), &calls, |b, &calls| {
            b.iter(|| black_box(repeated_blocks(calls, 16, 8).finish()));
        });
        group.bench_with_input(BenchmarkId::new("all_distinct", calls), &calls, |b, &calls| {
            b.iter(|| black_box(repeated_blocks(calls, calls as u64, 8).finish()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_declare, bench_registry);
criterion_main!(benches);
