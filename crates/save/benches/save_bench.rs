//! Stored-value and share-code throughput.
//!
//! Run with: `cargo bench -p save --bench save_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use projection::{Generation, Household, Saveable, SeaLevelConfig};
use save::file_header::{decode_value, encode_value};
use save::{decode_share, encode_share};

/// A household of `size` persons spread across every generation.
fn build_household(size: usize) -> Household {
    let config = SeaLevelConfig::default();
    let mut household = Household::seeded(&config);
    for i in 0..size.saturating_sub(household.len()) {
        let generation = Generation::ALL[i % Generation::ALL.len()];
        let birth_year = 1920 + (i as i32 * 7) % 110;
        household.add(
            &format!("Person {i}"),
            birth_year,
            generation,
            i % 5 == 0,
            &config,
        );
    }
    household
}

fn bench_stored_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("stored_value");
    for size in [4usize, 50, 500] {
        let bytes = build_household(size).save_to_bytes().unwrap_or_default();
        let wrapped = encode_value(&bytes);

        group.bench_with_input(BenchmarkId::new("encode", size), &bytes, |b, bytes| {
            b.iter(|| encode_value(black_box(bytes)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &wrapped, |b, wrapped| {
            b.iter(|| decode_value(black_box(wrapped)))
        });
    }
    group.finish();
}

fn bench_share_codes(c: &mut Criterion) {
    let mut group = c.benchmark_group("share_code");
    for size in [4usize, 50] {
        let household = build_household(size);
        let code = encode_share(household.persons());

        group.bench_with_input(
            BenchmarkId::new("encode", size),
            household.persons(),
            |b, persons| b.iter(|| encode_share(black_box(persons))),
        );
        group.bench_with_input(BenchmarkId::new("decode", size), &code, |b, code| {
            b.iter(|| decode_share(black_box(code)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stored_values, bench_share_codes);
criterion_main!(benches);
