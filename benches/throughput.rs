//! Throughput Benchmark for filestat
//!
//! This benchmark measures the text analysis hot path and the cost of
//! receiving a request into the storage directory.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use filestat::analysis::{analyze_text, count_lines, count_words};
use filestat::protocol::encode_length_prefixed;
use filestat::storage::{FileReceiver, ReceiveLimits};
use std::fs;

fn sample_text(size: usize) -> String {
    "The quick brown fox, jumps over (the) lazy dog!\nSecond line; with `code`.\r\n"
        .chars()
        .cycle()
        .take(size)
        .collect()
}

/// Benchmark the individual counters and the combined analysis
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for size in [1024, 64 * 1024, 1024 * 1024] {
        let text = sample_text(size);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_function(format!("lines_{}", size), |b| {
            b.iter(|| count_lines(black_box(&text)))
        });

        group.bench_function(format!("words_{}", size), |b| {
            b.iter(|| count_words(black_box(&text)))
        });

        group.bench_function(format!("analyze_{}", size), |b| {
            b.iter(|| analyze_text(black_box(&text)))
        });
    }

    group.finish();
}

/// Benchmark frame encoding
fn bench_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("framing");
    let payload = vec![b'x'; 64 * 1024];
    group.throughput(Throughput::Bytes(payload.len() as u64));

    group.bench_function("encode_64k", |b| {
        b.iter(|| encode_length_prefixed(black_box(&payload)).unwrap())
    });

    group.finish();
}

/// Benchmark receiving a request from memory to disk
fn bench_receive(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::TempDir::new().unwrap();

    let content = sample_text(1024 * 1024).into_bytes();
    let mut wire = Vec::new();
    wire.extend_from_slice(&1i32.to_le_bytes());
    wire.extend_from_slice(&encode_length_prefixed(b"bench.txt").unwrap());
    wire.extend_from_slice(&encode_length_prefixed(&content).unwrap());

    let mut group = c.benchmark_group("receive");
    group.throughput(Throughput::Bytes(wire.len() as u64));

    group.bench_function("receive_1m", |b| {
        b.iter(|| {
            let paths = runtime.block_on(async {
                let mut reader = &wire[..];
                FileReceiver::new(&mut reader, dir.path(), ReceiveLimits::default())
                    .receive_all()
                    .await
                    .unwrap()
            });
            for path in paths {
                fs::remove_file(path).unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_framing, bench_receive);
criterion_main!(benches);
