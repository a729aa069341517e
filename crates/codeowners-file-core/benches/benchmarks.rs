//! Benchmarks for codeowners-file-core
//!
//! Run with: cargo bench -p codeowners-file-core
//!
//! Filter benchmarks:
//!   cargo bench -- "parsing"
//!   cargo bench -- "matching"

use codeowners_file_core::parse::parse_str;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Builds a synthetic document with `rules` rule lines spread over a
/// handful of projects.
fn fixture(rules: usize) -> String {
    let mut out = String::new();
    for i in 0..rules {
        if i % 50 == 0 {
            out.push_str(&format!("# Project: Area{}\n", i / 50));
        }
        out.push_str(&format!("/crate{i}/src/**  @team{} @owner{i}\n", i % 7));
    }
    out
}

/// Benchmark parsing across fixture sizes
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for rules in [100usize, 1_000, 10_000] {
        let content = fixture(rules);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_str", rules),
            &content,
            |b, input| b.iter(|| parse_str(std::hint::black_box(input))),
        );
    }
    group.finish();
}

/// Benchmark steady-state path matching with warm matcher caches
fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    for rules in [100usize, 1_000] {
        let doc = parse_str(&fixture(rules)).unwrap();
        // First lookup compiles and memoizes every consulted matcher.
        doc.match_path("crate0/src/lib.rs", false);

        group.bench_with_input(BenchmarkId::new("match_path", rules), &doc, |b, doc| {
            b.iter(|| doc.match_path(std::hint::black_box("crate0/src/lib.rs"), false))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parsing, bench_matching);
criterion_main!(benches);
