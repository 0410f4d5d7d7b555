//! Benchmarks for segment merging, noise cleaning and tokenization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docnorm::text::{merge_segments, remove_noise};
use docnorm::{StopwordSet, Tokenizer};

/// Mixed-script lines shaped like PDF and DOCX output.
const SAMPLE_LINES: &[&str] = &[
    "2024年度财务报告",
    "第一章（总则）",
    "The inter-",
    "national budget was reviewed ______ by the committee.",
    "目录..............................3",
    "本报告说明了公司的收入增长情况",
    "Printing and travel costs fell in the second quarter.",
];

fn generate_segments(count: usize) -> Vec<String> {
    SAMPLE_LINES
        .iter()
        .cycle()
        .take(count)
        .map(|line| line.to_string())
        .collect()
}

fn merge_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_segments");

    for count in [10, 100, 1000] {
        let segments = generate_segments(count);
        let bytes: usize = segments.iter().map(String::len).sum();
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &segments, |b, segments| {
            b.iter(|| merge_segments(black_box(segments)));
        });
    }

    group.finish();
}

fn clean_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_noise");

    for count in [10, 100, 1000] {
        let merged = merge_segments(&generate_segments(count));
        group.throughput(Throughput::Bytes(merged.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &merged, |b, merged| {
            b.iter(|| remove_noise(black_box(merged)));
        });
    }

    group.finish();
}

fn tokenize_benchmark(c: &mut Criterion) {
    let tokenizer = Tokenizer::with_jieba(StopwordSet::default());
    let content = remove_noise(&merge_segments(&generate_segments(100)));

    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(content.len() as u64));
    group.bench_function("jieba_100_lines", |b| {
        b.iter(|| tokenizer.tokenize(black_box(&content)));
    });
    group.finish();
}

criterion_group!(benches, merge_benchmark, clean_benchmark, tokenize_benchmark);
criterion_main!(benches);
