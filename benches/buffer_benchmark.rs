// benches/buffer_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use buffer_utils::*;

fn generate_data(count: usize) -> Vec<u64> {
    (0..count as u64).map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15)).collect()
}

fn benchmark_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum");

    for size in [1000, 100000, 1000000].iter() {
        let data = generate_data(*size);
        group.throughput(Throughput::Bytes((*size * 8) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| sum(&BufferView::new(black_box(data))));
        });
    }

    group.finish();
}

fn benchmark_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse");

    for size in [1000, 100000, 1000000].iter() {
        let mut data = generate_data(*size);
        group.throughput(Throughput::Bytes((*size * 8) as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| reverse(&mut BufferViewMut::new(black_box(&mut data))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sum, benchmark_reverse);
criterion_main!(benches);
