use bytes::BytesMut;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use walrec::{Frames, Record, checksum, encode_into};

const KEY: &[u8] = b"user:0000000042";

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for (label, size) in [("64b", 64), ("1kb", 1024), ("64kb", 64 * 1024)] {
        let record = Record::new(KEY, vec![0u8; size]);
        group.throughput(Throughput::Bytes(record.encoded_len() as u64));
        group.bench_function(format!("encode_{label}"), |b| {
            b.iter(|| {
                black_box(record.encode());
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for (label, size) in [("64b", 64), ("1kb", 1024), ("64kb", 64 * 1024)] {
        let encoded = Record::new(KEY, vec![0u8; size]).encode();
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_function(format!("decode_{label}"), |b| {
            b.iter(|| {
                black_box(Record::decode(&encoded).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");

    let data = vec![0xA5u8; 64 * 1024];
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("crc32_64kb", |b| {
        b.iter(|| {
            black_box(checksum(black_box(&data)));
        });
    });

    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("frames");

    let mut log = BytesMut::new();
    for i in 0..1000u32 {
        encode_into(&i.to_be_bytes(), &[0u8; 128], &mut log);
    }
    group.throughput(Throughput::Bytes(log.len() as u64));
    group.bench_function("replay_1000x128b", |b| {
        b.iter(|| {
            let count = Frames::new(&log).filter(Result::is_ok).count();
            black_box(count);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_checksum, bench_replay);
criterion_main!(benches);
