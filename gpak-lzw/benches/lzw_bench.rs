//! Throughput benchmarks for the LZW codec.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gpak_lzw::codec::{decode_buffer, encode_buffer};
use std::hint::black_box;

/// Reproducible pseudo-random bytes via a linear congruential generator.
fn random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn repetitive(size: usize) -> Vec<u8> {
    b"TOBEORNOTTOBEORTOBEORNOT"
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}

fn uniform(size: usize) -> Vec<u8> {
    vec![0xAA; size]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzw_encode");
    let size = 256 * 1024;

    for (name, data) in [
        ("uniform", uniform(size)),
        ("repetitive", repetitive(size)),
        ("random", random(size)),
    ] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let encoded = encode_buffer(black_box(data)).unwrap();
                black_box(encoded);
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzw_decode");
    let size = 256 * 1024;

    for (name, data) in [
        ("uniform", uniform(size)),
        ("repetitive", repetitive(size)),
        ("random", random(size)),
    ] {
        let encoded = encode_buffer(&data).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &encoded, |b, encoded| {
            b.iter(|| {
                let decoded = decode_buffer(&encoded.metadata, black_box(&encoded.codes)).unwrap();
                black_box(decoded);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
