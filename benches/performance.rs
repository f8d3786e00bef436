// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for Tonal
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Scale lookup with a warm and a cold key cache
//! - Interval spelling and naming
//! - Shorthand parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tonal::containers::Note;
use tonal::music::intervals;
use tonal::music::keys::{KeyCache, KEYS};

/// Benchmark scale lookup, cached versus computed
fn bench_get_notes(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_notes");

    let warm = KeyCache::new();
    for key in ["C", "F#", "bb"] {
        warm.get_notes(key).unwrap();
        group.bench_with_input(BenchmarkId::new("cached", key), key, |b, key| {
            b.iter(|| black_box(warm.get_notes(black_box(key)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("fresh", key), key, |b, key| {
            b.iter(|| {
                let cache = KeyCache::new();
                black_box(cache.get_notes(black_box(key)).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark building every absolute interval from each major tonic
fn bench_interval_builders(c: &mut Criterion) {
    let tonics: Vec<&str> = KEYS.iter().map(|&(major, _)| major).collect();

    c.bench_function("major_seventh_all_keys", |b| {
        b.iter(|| {
            for tonic in &tonics {
                black_box(intervals::major_seventh(black_box(tonic)).unwrap());
            }
        })
    });

    c.bench_function("minor_third_all_keys", |b| {
        b.iter(|| {
            for tonic in &tonics {
                black_box(intervals::minor_third(black_box(tonic)).unwrap());
            }
        })
    });
}

/// Benchmark naming intervals
fn bench_determine(c: &mut Criterion) {
    let pairs = [("C", "E"), ("C", "Ebb"), ("F#", "C"), ("Ab", "G#"), ("B", "F")];
    let mut group = c.benchmark_group("determine");

    for shorthand in [false, true] {
        let label = if shorthand { "shorthand" } else { "long" };
        group.bench_with_input(BenchmarkId::new("pairs", label), &shorthand, |b, &shorthand| {
            b.iter(|| {
                for (a, z) in &pairs {
                    black_box(intervals::determine(a, z, shorthand, true).unwrap());
                }
            })
        });
    }

    group.finish();
}

/// Benchmark shorthand parsing and application
fn bench_from_shorthand(c: &mut Criterion) {
    let shorthands = ["b2", "3", "#4", "5", "bb7", "9", "#11", "b13"];

    c.bench_function("parse_shorthand", |b| {
        b.iter(|| {
            for s in &shorthands {
                black_box(intervals::parse_shorthand(black_box(s)).unwrap());
            }
        })
    });

    c.bench_function("from_shorthand", |b| {
        b.iter(|| {
            for s in &shorthands {
                black_box(intervals::from_shorthand("Eb", black_box(s), true).unwrap());
            }
        })
    });
}

/// Benchmark transposing an octave-aware note
fn bench_note_transpose(c: &mut Criterion) {
    c.bench_function("note_transpose", |b| {
        b.iter(|| {
            let mut note = Note::from_int(black_box(48));
            note.transpose("5", true).unwrap();
            note.transpose("b3", false).unwrap();
            black_box(note.to_int())
        })
    });
}

criterion_group!(
    benches,
    bench_get_notes,
    bench_interval_builders,
    bench_determine,
    bench_from_shorthand,
    bench_note_transpose
);
criterion_main!(benches);
