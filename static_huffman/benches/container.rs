use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId, Throughput};
use static_huffman::{serialize_data, deserialize_data, serialize_bytes, deserialize_bytes};

/// Returns `len` bytes of text in which the initial letters of the alphabet occur more often.
fn skewed_text(len: usize) -> String {
    let alphabet: Vec<char> = ('a'..='z').collect();
    (0..len).map(|i| alphabet[(i * i) % alphabet.len() * (i % 4 + 1) / 4]).collect()
}

pub fn text(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_data");
    for len in [1024, 64 * 1024, 1024 * 1024].iter() {
        let content = skewed_text(*len);
        group.throughput(Throughput::Bytes(*len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &content, |b, content| {
            b.iter(|| serialize_data(black_box(content), false))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("deserialize_data");
    for len in [1024, 64 * 1024, 1024 * 1024].iter() {
        let container = serialize_data(&skewed_text(*len), false).unwrap();
        group.throughput(Throughput::Bytes(*len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &container, |b, container| {
            b.iter(|| deserialize_data(black_box(container), false))
        });
    }
    group.finish();
}

pub fn bytes(c: &mut Criterion) {
    let content: Vec<u8> = (0..256 * 1024u32).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8 & (i as u8 | 0x0F)).collect();
    let container = serialize_bytes(&content, false).unwrap();
    c.bench_function("serialize_bytes", |b| b.iter(|| serialize_bytes(black_box(&content), false)));
    c.bench_function("deserialize_bytes", |b| b.iter(|| deserialize_bytes(black_box(&container), false)));
}

criterion_group!(container, text, bytes);
criterion_main!(container);
