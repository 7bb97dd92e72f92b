// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for Scalewise
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Key construction and spelling
//! - Chord building
//! - Self-replication and infinity series generation
//! - Pattern expansion (counting, zig-zag)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scalewise::{
    infinity_series, norgard_integer, BoundaryMode, ChordType, Key, Melody, Scale, SeriesOffset,
};

/// Benchmark key construction for every scale
fn bench_key_construction(c: &mut Criterion) {
    c.bench_function("key_all_scales", |b| {
        b.iter(|| {
            for scale in Scale::ALL {
                black_box(Key::new(black_box("G#"), scale).ok());
            }
        })
    });
}

/// Benchmark triad and fixed-interval chords across two octaves
fn bench_chords(c: &mut Criterion) {
    let key = Key::new("Eb", Scale::Dorian).unwrap();
    let power = ChordType::parse("pow").unwrap();

    let mut group = c.benchmark_group("chords");
    group.bench_function("triads", |b| {
        b.iter(|| {
            for degree in (-7..=-1).chain(1..=14) {
                black_box(key.chord(degree, &ChordType::Triad).ok());
            }
        })
    });
    group.bench_function("power", |b| {
        b.iter(|| {
            for degree in 1..=14 {
                black_box(key.chord(degree, &power).ok());
            }
        })
    });
    group.finish();
}

/// Benchmark self-replication at growing lengths
fn bench_self_replicate(c: &mut Criterion) {
    let key = Key::new("D", Scale::Minor).unwrap();
    let melody = Melody::from_degrees(&[1, 3, 5, 4, 2, 7, 6], &key).unwrap();

    let mut group = c.benchmark_group("self_replicate");
    for length in [63usize, 255, 1023, 4095].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(length), length, |b, &length| {
            b.iter(|| black_box(melody.self_replicate(length, 2).ok()))
        });
    }
    group.finish();
}

/// Benchmark infinity series windows and range mapping
fn bench_infinity_series(c: &mut Criterion) {
    c.bench_function("norgard_integer", |b| {
        b.iter(|| black_box(norgard_integer(black_box(0xDEAD_BEEF))))
    });

    let mut group = c.benchmark_group("infinity_series");
    for size in [16usize, 256, 4096].iter() {
        group.bench_with_input(BenchmarkId::new("window", size), size, |b, &size| {
            b.iter(|| {
                black_box(infinity_series([0, 1], size, SeriesOffset::Start(1 << 20), BoundaryMode::Clamp).ok())
            })
        });
        group.bench_with_input(BenchmarkId::new("fold", size), size, |b, &size| {
            b.iter(|| {
                black_box(infinity_series([0, 3], size, SeriesOffset::Range(-12, 12), BoundaryMode::Fold).ok())
            })
        });
    }
    group.finish();
}

/// Benchmark counting and zig-zag expansion
fn bench_patterns(c: &mut Criterion) {
    let midi: Vec<i32> = (48..72).collect();
    let melody = Melody::from_midi(&midi, None).unwrap();

    c.bench_function("counted_24", |b| b.iter(|| black_box(melody.counted())));
    c.bench_function("zig_zag_24", |b| b.iter(|| black_box(melody.zig_zag())));
}

criterion_group!(
    benches,
    bench_key_construction,
    bench_chords,
    bench_self_replicate,
    bench_infinity_series,
    bench_patterns,
);
criterion_main!(benches);
