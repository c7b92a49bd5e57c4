use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use suid::{BlockAllocator, MemoryBlockStore, Suid, SuidPool, SuidTextExt};

fn bench_codec(c: &mut Criterion) {
    let id = Suid::from_parts(123_456_789, 42, 1);
    let text = id.to_text();

    c.bench_function("codec/encode", |b| {
        b.iter(|| black_box(&id).to_text());
    });
    c.bench_function("codec/decode", |b| {
        b.iter(|| Suid::from_text(black_box(&text)).unwrap());
    });
    c.bench_function("codec/looks_valid", |b| {
        b.iter(|| Suid::looks_valid(black_box(&text)));
    });
}

fn bench_pool(c: &mut Criterion) {
    let allocator =
        Arc::new(BlockAllocator::<Suid, _>::new(MemoryBlockStore::new(), 0).unwrap());
    let pool = SuidPool::new(allocator);

    c.bench_function("pool/next", |b| {
        b.iter(|| pool.next().unwrap());
    });
}

fn bench_allocator(c: &mut Criterion) {
    let allocator =
        BlockAllocator::<Suid, _>::new(MemoryBlockStore::new(), 0).unwrap();

    c.bench_function("allocator/next_blocks_8", |b| {
        b.iter(|| allocator.next_blocks(black_box(8)).unwrap());
    });
}

criterion_group!(benches, bench_codec, bench_pool, bench_allocator);
criterion_main!(benches);
