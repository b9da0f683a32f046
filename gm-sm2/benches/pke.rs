//! SM2 encryption benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use gm_sm2::{pke::DecryptingKey, rand_core::OsRng};
use hex_literal::hex;

const PRIVATE_KEY: [u8; 32] =
    hex!("3DDD2A3679BF6F1DFC3B49D3E99114718E48EC170EB4E4D3A82052DAB19E8B50");

fn decrypting_key() -> DecryptingKey {
    DecryptingKey::from_slice(&PRIVATE_KEY).unwrap()
}

fn bench_encrypt<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let ek = black_box(decrypting_key().encrypting_key().clone());
    let msg = black_box([0x5a; 1024]);
    group.bench_function("encrypt 1KiB", |b| {
        b.iter(|| black_box(ek.encrypt(&mut OsRng, &msg).unwrap()))
    });
}

fn bench_decrypt<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let dk = black_box(decrypting_key());
    let ciphertext = black_box(dk.encrypting_key().encrypt(&mut OsRng, &[0x5a; 1024]).unwrap());
    group.bench_function("decrypt 1KiB", |b| {
        b.iter(|| black_box(dk.decrypt(&ciphertext).unwrap()))
    });
}

fn bench_pke(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM2PKE");
    bench_encrypt(&mut group);
    bench_decrypt(&mut group);
    group.finish();
}

criterion_group!(benches, bench_pke);
criterion_main!(benches);
