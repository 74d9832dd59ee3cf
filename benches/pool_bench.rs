//! Benchmarks for the handoff pool.
//!
//! Benchmarks cover:
//! - Submit/recv round trip through a rendezvous queue
//! - Batch throughput across worker counts
//! - Rendezvous versus buffered queue
//! - Pool startup and shutdown

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use handoff_pool::config::WorkerPoolConfig;
use handoff_pool::core::WorkerPool;

// ============================================================================
// Helper Functions
// ============================================================================

fn spin(iterations: u64) -> u64 {
    (0..iterations).fold(0_u64, |acc, i| acc.wrapping_mul(31).wrapping_add(i))
}

fn run_batch(pool: &WorkerPool<u64>, tasks: u64, work: u64) -> u64 {
    let handles: Vec<_> = (0..tasks)
        .map(|i| {
            pool.submit(move || Ok::<_, anyhow::Error>(spin(work) ^ i))
                .expect("submit failed")
        })
        .collect();
    handles
        .into_iter()
        .map(|h| h.recv().expect("task failed"))
        .fold(0, u64::wrapping_add)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_round_trip(c: &mut Criterion) {
    let pool = WorkerPool::<u64>::new(1).expect("pool");
    c.bench_function("round_trip_single_task", |b| {
        b.iter(|| {
            let handle = pool
                .submit(|| Ok::<_, anyhow::Error>(black_box(1)))
                .expect("submit failed");
            black_box(handle.recv().expect("task failed"))
        });
    });
    pool.wait();
}

fn bench_batch_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_throughput");
    let tasks = 1_000_u64;
    group.throughput(Throughput::Elements(tasks));

    for workers in [1_usize, 2, 4, 8] {
        let pool = WorkerPool::<u64>::new(workers).expect("pool");
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| black_box(run_batch(&pool, tasks, 200)));
        });
        pool.wait();
    }
    group.finish();
}

fn bench_queue_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_capacity");
    let tasks = 1_000_u64;
    group.throughput(Throughput::Elements(tasks));

    for capacity in [0_usize, 16, 256] {
        let config = WorkerPoolConfig::new()
            .with_worker_count(4)
            .with_queue_capacity(capacity);
        let pool = WorkerPool::<u64>::with_config(config).expect("pool");
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, _| {
            b.iter(|| black_box(run_batch(&pool, tasks, 50)));
        });
        pool.wait();
    }
    group.finish();
}

fn bench_startup_shutdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("startup_shutdown");
    for workers in [1_usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &n| {
            b.iter(|| {
                let pool = WorkerPool::<()>::new(n).expect("pool");
                pool.wait();
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_round_trip,
    bench_batch_throughput,
    bench_queue_capacity,
    bench_startup_shutdown
);
criterion_main!(benches);
