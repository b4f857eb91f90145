//! Performance benchmarks for cgrep
//!
//! Run with: cargo bench

use cgrep::query::{find_matches, similarity, DirectoryScanner, ScanOptions};
use cgrep::utils::{bigrams_of, canonicalize, CanonicalText};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use tempfile::TempDir;

const PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog. \
    Pack my box with five dozen liquor jugs! How vexingly quick daft zebras jump; \
    the five boxing wizards jump quickly.\n";

/// Create a directory of text files for scan benchmarks
fn create_benchmark_fixtures(files: usize) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    for i in 0..files {
        let content = format!("File {i}\n{}", PARAGRAPH.repeat(20));
        fs::write(temp_dir.path().join(format!("file_{}.txt", i)), content)
            .expect("Failed to write file");
    }

    temp_dir
}

fn bench_canonicalize(c: &mut Criterion) {
    let medium = PARAGRAPH.repeat(20);

    let mut group = c.benchmark_group("canonicalize");
    group.bench_function("paragraph", |b| b.iter(|| canonicalize(black_box(PARAGRAPH))));
    group.bench_function("medium_4kb", |b| b.iter(|| canonicalize(black_box(&medium))));
    group.finish();
}

fn bench_bigrams(c: &mut Criterion) {
    let short = CanonicalText::new("quick brown fox");
    let long = CanonicalText::new(PARAGRAPH);

    let mut group = c.benchmark_group("bigrams_of");
    group.bench_function("phrase", |b| b.iter(|| bigrams_of(black_box(&short))));
    group.bench_function("paragraph", |b| b.iter(|| bigrams_of(black_box(&long))));
    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let a = CanonicalText::new("quick brown fox");
    let b_text = CanonicalText::new("quick brown fax");

    c.bench_function("similarity", |b| {
        b.iter(|| similarity(black_box(&a), black_box(&b_text)))
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");
    for repeats in [1usize, 10, 100] {
        let haystack = PARAGRAPH.repeat(repeats);
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &haystack, |b, h| {
            b.iter(|| find_matches(black_box("quick brown fox"), black_box(h), 0.7))
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let fixtures = create_benchmark_fixtures(50);

    let mut group = c.benchmark_group("scan_directory");
    for jobs in [1usize, 0] {
        let options = ScanOptions {
            jobs,
            ..ScanOptions::new(0.7)
        };
        let scanner = DirectoryScanner::new(options);
        let label = if jobs == 0 { "all_cpus" } else { "single_thread" };
        group.bench_function(label, |b| {
            b.iter(|| scanner.scan(black_box("quick brown fox"), fixtures.path()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_canonicalize,
    bench_bigrams,
    bench_similarity,
    bench_matching,
    bench_scan,
);

criterion_main!(benches);
