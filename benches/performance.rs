//! Performance benchmarks for ftest
//!
//! Aggregation and formatting are measured in isolation; the burst
//! benchmark runs real probes against an in-process echo server.

use clap::Parser;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ftest::{
    cli::Cli,
    client::{ProbeSettings, TcpProber},
    executor::ConcurrentRunner,
    models::ProbeReport,
    output::{format_duration, FormattingOptions, PlainFormatter, ReportFormatter},
    stats::{aggregate_with, AveragingMode, ResponseTimeDistribution},
};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

/// Create sample probe reports with a spread of timings
fn create_sample_reports(count: usize) -> Vec<ProbeReport> {
    (0..count)
        .map(|i| {
            ProbeReport::new(
                b"hello world".to_vec(),
                Duration::from_micros(100 + (i as u64 * 7) % 900),
                Duration::from_micros(5 + (i as u64 * 3) % 20),
                Duration::from_micros(200 + (i as u64 * 11) % 1_500),
            )
        })
        .collect()
}

/// Benchmark aggregation in both averaging modes
fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in [10, 100, 1_000, 10_000].iter() {
        let reports = create_sample_reports(*size);

        group.bench_with_input(BenchmarkId::new("divide_first", size), size, |b, _| {
            b.iter(|| black_box(aggregate_with(black_box(&reports), AveragingMode::DivideFirst)));
        });

        group.bench_with_input(BenchmarkId::new("sum_first", size), size, |b, _| {
            b.iter(|| black_box(aggregate_with(black_box(&reports), AveragingMode::SumFirst)));
        });

        group.bench_with_input(BenchmarkId::new("distribution", size), size, |b, _| {
            b.iter(|| black_box(ResponseTimeDistribution::from_reports(black_box(&reports))));
        });
    }

    group.finish();
}

/// Benchmark report rendering
fn benchmark_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");

    group.bench_function("format_duration", |b| {
        let samples = [
            Duration::from_nanos(750),
            Duration::from_nanos(12_500),
            Duration::from_nanos(1_234_567),
            Duration::from_secs(90),
        ];
        b.iter(|| {
            for sample in samples {
                black_box(format_duration(black_box(sample)));
            }
        });
    });

    group.bench_function("plain_aggregate", |b| {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let report = aggregate_with(&create_sample_reports(100), AveragingMode::default());
        b.iter(|| black_box(formatter.format_aggregate(black_box(&report), None).unwrap()));
    });

    group.bench_function("parse_cli_args", |b| {
        let args = ["ftest", "balancer", "127.0.0.1:9000", "-d", "a,b,c,d", "-e", "1,2,1,2", "--json"];
        b.iter(|| black_box(Cli::try_parse_from(black_box(args)).unwrap()));
    });

    group.finish();
}

async fn spawn_echo_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                while let Ok(n) = socket.read(&mut buf).await {
                    if n == 0 || socket.write_all(&buf[..n]).await.is_err() {
                        break;
                    }
                }
            });
        }
    });

    address
}

/// Benchmark a loopback burst end to end
fn benchmark_burst(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let address = rt.block_on(spawn_echo_server());
    let runner = ConcurrentRunner::new(Arc::new(TcpProber::new(ProbeSettings::default())));

    let mut group = c.benchmark_group("burst");
    group.sample_size(20);

    for concurrency in [1, 10, 50].iter() {
        group.bench_with_input(BenchmarkId::new("loopback", concurrency), concurrency, |b, &n| {
            b.iter(|| black_box(rt.block_on(runner.run(&address, b"hello world", n)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_aggregation,
    benchmark_formatting,
    benchmark_burst
);

criterion_main!(benches);
