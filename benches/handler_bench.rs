//! Benchmarks for numsift
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;
use std::path::Path;

fn benchmark_number_set_insert(c: &mut Criterion) {
    use numsift::aggregate::NumberSet;

    let mut rng = StdRng::seed_from_u64(1);
    let values: Vec<i64> = (0..100_000).map(|_| rng.gen_range(-50_000..50_000)).collect();

    c.bench_function("number_set_insert_100k", |b| {
        b.iter(|| {
            let mut set = NumberSet::new();
            for &v in &values {
                set.insert(v);
            }
            black_box(set.len())
        })
    });
}

fn benchmark_parse_reader(c: &mut Criterion) {
    use numsift::aggregate::NumberSet;
    use numsift::parser::parse_reader;

    let mut rng = StdRng::seed_from_u64(2);
    let input: String = (0..10_000)
        .map(|_| format!("{}\n", rng.gen_range(i32::MIN..i32::MAX)))
        .collect();

    c.bench_function("parse_reader_10k_lines", |b| {
        b.iter(|| {
            let mut numbers = NumberSet::new();
            let stats = parse_reader(
                Cursor::new(input.as_bytes()),
                Path::new("bench.txt"),
                &|v: i64| v % 4 == 3,
                &mut numbers,
            )
            .unwrap();
            black_box(stats)
        })
    });
}

criterion_group!(benches, benchmark_number_set_insert, benchmark_parse_reader);
criterion_main!(benches);
