use criterion::{black_box, criterion_group, criterion_main, Criterion};

use speck::speck128::{encrypt_block, key_schedule, BLOCK_SIZE};

const KEYS: [(&str, &[u8]); 3] = [
    (
        "128",
        &[
            0x0f, 0x0e, 0x0d, 0x0c, 0x0b, 0x0a, 0x09, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02,
            0x01, 0x00,
        ],
    ),
    (
        "192",
        &[
            0x17, 0x16, 0x15, 0x14, 0x13, 0x12, 0x11, 0x10, 0x0f, 0x0e, 0x0d, 0x0c, 0x0b, 0x0a,
            0x09, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x00,
        ],
    ),
    (
        "256",
        &[
            0x1f, 0x1e, 0x1d, 0x1c, 0x1b, 0x1a, 0x19, 0x18, 0x17, 0x16, 0x15, 0x14, 0x13, 0x12,
            0x11, 0x10, 0x0f, 0x0e, 0x0d, 0x0c, 0x0b, 0x0a, 0x09, 0x08, 0x07, 0x06, 0x05, 0x04,
            0x03, 0x02, 0x01, 0x00,
        ],
    ),
];

const BLOCK: [u8; BLOCK_SIZE] = [
    0x6c, 0x61, 0x76, 0x69, 0x75, 0x71, 0x65, 0x20, 0x74, 0x69, 0x20, 0x65, 0x64, 0x61, 0x6d,
    0x20,
];

fn bench_speck128(c: &mut Criterion) {
    for &(name, key) in KEYS.iter() {
        let mut group = c.benchmark_group(format!("speck128/{}", name));

        group.bench_function("key_schedule", |b| {
            b.iter(|| key_schedule(black_box(key)).unwrap())
        });

        let ks = key_schedule(key).unwrap();
        let mut block = BLOCK;
        group.bench_function("encrypt_block", |b| {
            b.iter(|| {
                encrypt_block(&mut block, &ks);
                block
            })
        });

        let mut block = BLOCK;
        group.bench_function("key_schedule_encrypt_block", |b| {
            b.iter(|| {
                let ks = key_schedule(black_box(key)).unwrap();
                encrypt_block(&mut block, &ks);
                block
            })
        });

        group.finish();
    }
}

criterion_group!(benches, bench_speck128);
criterion_main!(benches);
