/// Hash computation benchmarks
/// Measures SHA-256 throughput over document-sized inputs
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;
use textbin::infrastructure::storage::ContentHasher;

fn hash_computation_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_computation");
    group.measurement_time(Duration::from_secs(5));

    for size in [64, 1024, 64 * 1024, 400_000].iter() {
        let size = *size;
        let data = vec![b'a'; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("hash", size), &data, |b, data| {
            b.iter(|| ContentHasher::hash(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("hash_chunks", size), &data, |b, data| {
            b.iter(|| ContentHasher::hash_chunks(black_box(data.chunks(8 * 1024))))
        });
    }

    group.finish();
}

criterion_group!(benches, hash_computation_benchmarks);
criterion_main!(benches);
