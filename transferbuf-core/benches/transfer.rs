//! Append/discard cycle benchmarks
//!
//! Measures one transmitter cycle (append from a filled source, iterate,
//! discard) for different burst sizes and duplicate ratios.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use transferbuf_core::{Reading, ReadingSource, SourceBuffer, TransferBuffer};

fn fill(source: &SourceBuffer, start_ms: u64, count: u64, hold: u64) {
    for i in 0..count {
        let value = ((start_ms + i) / hold) as f64;
        source.push(Reading::at_millis(value, start_ms + i));
    }
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_cycle");

    for &burst in &[16u64, 256, 4096] {
        group.throughput(Throughput::Elements(burst));

        for &(label, hold, min_gap) in &[("distinct", 1u64, 0u64), ("dedup", 8, 4)] {
            group.bench_with_input(BenchmarkId::new(label, burst), &burst, |b, &burst| {
                let source = SourceBuffer::with_capacity(burst as usize);
                let mut buffer = TransferBuffer::with_target_capacity(1024);
                let mut t = 1u64;

                b.iter(|| {
                    fill(&source, t, burst, hold);
                    t += burst;

                    let added = buffer.append(&source, "bench", min_gap);
                    let sum: f64 = buffer.iter().map(|r| r.value()).sum();
                    black_box(sum);
                    buffer.discard(added, 1);
                    source.clean();
                });
            });
        }
    }

    group.finish();
}

fn bench_rescan(c: &mut Criterion) {
    // every reading already consumed: measures the skip path
    let source = SourceBuffer::new();
    fill(&source, 1, 4096, 1);
    let mut buffer = TransferBuffer::new();
    buffer.append(&source, "bench", 0);

    c.bench_function("rescan_consumed_4096", |b| {
        b.iter(|| black_box(buffer.append(&source, "bench", 0)))
    });

    c.bench_function("pending_count_4096", |b| {
        b.iter(|| black_box(source.pending()))
    });
}

criterion_group!(benches, bench_cycle, bench_rescan);
criterion_main!(benches);
