use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lnk_decoder::{BlockReader, ExtraDataDecoder};
use lnk_tests::synthetic_encoder;

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for count in [10, 100, 1000] {
        let bytes = synthetic_encoder(count).encode().expect("synthetic region encodes");
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("section", count), &bytes, |b, bytes| {
            b.iter(|| ExtraDataDecoder::decode(&mut black_box(bytes.as_slice())));
        });

        group.bench_with_input(BenchmarkId::new("block_reader", count), &bytes, |b, bytes| {
            b.iter(|| BlockReader::new(black_box(bytes.as_slice())).count());
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let encoder = synthetic_encoder(1000);
    c.bench_function("encode/1000", |b| b.iter(|| black_box(&encoder).encode()));
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
