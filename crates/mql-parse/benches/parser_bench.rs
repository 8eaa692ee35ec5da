//! Parser benchmarks.
//!
//! Run with `cargo bench --package mql-parse`.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mql_parse::parse;

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let short = "q.health + 1";
    let nested = "math.clamp(q.health + math.lerp(0, q.max_health, q.t), 0, q.max_health) == 1 ? 1 : 0";

    group.bench_function("short_expression", |b| b.iter(|| parse(black_box(short)).unwrap()));
    group.bench_function("nested_ternary_and_calls", |b| b.iter(|| parse(black_box(nested)).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
