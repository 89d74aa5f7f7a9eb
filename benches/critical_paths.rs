use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledger_verify::core::hash::{combine, sha256_hash};
use ledger_verify::core::{candidate_root, verify_chain, verify_inclusion};
use ledger_verify::test_utils::{build_chain, sample_proof};

fn bench_combine(c: &mut Criterion) {
    let a = sha256_hash(b"left");
    let b = sha256_hash(b"right");
    c.bench_function("combine", |bench| {
        bench.iter(|| combine(black_box(&a), black_box(&b)).unwrap());
    });
}

fn bench_verify_inclusion(c: &mut Criterion) {
    let leaf = sha256_hash(b"revision");
    let proof = sample_proof("bench", 32);
    let root = candidate_root(&leaf, &proof).unwrap();
    c.bench_function("verify_inclusion_depth_32", |bench| {
        bench.iter(|| verify_inclusion(black_box(&leaf), black_box(&proof), black_box(&root)).unwrap());
    });
}

fn bench_verify_chain(c: &mut Criterion) {
    let blocks = build_chain("bench", 0, 1_000, &sha256_hash(b"genesis"));
    c.bench_function("verify_chain_1000_blocks", |bench| {
        bench.iter(|| verify_chain(black_box(&blocks)).unwrap());
    });
}

criterion_group!(benches, bench_combine, bench_verify_inclusion, bench_verify_chain);
criterion_main!(benches);
