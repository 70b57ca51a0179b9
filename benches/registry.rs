#![allow(unused)]
extern crate threadscope;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use threadscope::{FunctionId, ThreadId, ThreadRegistry};

/// Benchmark the per-callback cost of a full exception cycle on one thread
///
/// Mirrors what the runtime drives for every thrown exception: throw, catcher found, query,
/// handled.
fn bench_exception_cycle(c: &mut Criterion) {
    let registry = ThreadRegistry::new();
    let thread = ThreadId::new(1);
    registry.thread_created(thread).unwrap();

    let mut group = c.benchmark_group("exception_cycle");
    group.throughput(Throughput::Elements(1));
    group.bench_function("throw_catch_clear", |b| {
        b.iter(|| {
            registry.set_has_exception(black_box(thread)).unwrap();
            registry
                .set_exception_catcher_function(thread, FunctionId::new(42))
                .unwrap();
            let info = registry.get_exception(thread).unwrap();
            registry.clear_exception(thread).unwrap();
            black_box(info)
        });
    });
    group.finish();
}

/// Benchmark thread create / destroy churn
fn bench_lifecycle(c: &mut Criterion) {
    let registry = ThreadRegistry::new();
    let mut next = 1usize;

    c.bench_function("thread_create_destroy", |b| {
        b.iter(|| {
            let thread = ThreadId::new(next);
            next += 1;
            registry.thread_created(black_box(thread)).unwrap();
            registry.thread_destroyed(thread).unwrap();
        });
    });
}

/// Benchmark the fleet-wide scan at several registry sizes, worst case (no match)
fn bench_any_exception_pending(c: &mut Criterion) {
    let mut group = c.benchmark_group("any_exception_pending");

    for size in [16usize, 256, 4096] {
        let registry = ThreadRegistry::new();
        for raw in 1..=size {
            registry.thread_created(ThreadId::new(raw)).unwrap();
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &registry, |b, registry| {
            b.iter(|| black_box(registry.any_exception_pending().unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_exception_cycle,
    bench_lifecycle,
    bench_any_exception_pending
);
criterion_main!(benches);
