use criterion::{criterion_group, criterion_main, Criterion};

use aoc2022::{default_input, ALL_SOLUTIONS};

pub fn criterion_benchmark(c: &mut Criterion) {
    for (i, day) in ALL_SOLUTIONS.iter().enumerate() {
        // Days without a local input are skipped.
        let Ok(input) = default_input(i + 1) else {
            continue;
        };
        c.bench_function(&format!("day{}", i + 1), |b| b.iter(|| day(&input)));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
