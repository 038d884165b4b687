//! Criterion benchmarks for whole command-stream runs.

use std::hint::black_box;
use std::io;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mman_bench::{engine_profile, stress_profile, STRATEGIES};
use mman_engine::{parse_line, run};
use mman_test_utils::command_script;

/// Benchmark: parse every line of a 10K-command script.
fn bench_parse(c: &mut Criterion) {
    let script = command_script(42, 10_000);
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(script.len() as u64));
    group.bench_function("script_10k", |b| {
        b.iter(|| {
            for line in script.lines() {
                black_box(parse_line(line.as_bytes()).ok());
            }
        });
    });
    group.finish();
}

/// Benchmark: run a 10K-command script end to end, report to a sink.
fn bench_run(c: &mut Criterion) {
    let script = command_script(42, 10_000);
    let mut group = c.benchmark_group("run_10k");
    for placement in STRATEGIES {
        let config = engine_profile(stress_profile(placement));
        group.bench_with_input(BenchmarkId::from_parameter(placement), &config, |b, config| {
            b.iter(|| {
                let summary = run(config, script.as_bytes(), &mut io::sink()).unwrap();
                black_box(summary.state_hash);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_run);
criterion_main!(benches);
