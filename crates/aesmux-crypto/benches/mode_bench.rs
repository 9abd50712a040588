//! Mode throughput through a context on the software engine.
//!
//! Run with: cargo bench -p aesmux-crypto

use std::sync::Arc;

use aesmux_crypto::aes::{SoftAesEngine, SoftAesKey};
use aesmux_crypto::provider::BlockCipher;
use aesmux_crypto::{
    CbcState, Cfb128State, Cfb8State, CipherContext, CtrState, Direction, Engine, KeyBits,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn context(engine: &Arc<Engine>, bits: u32) -> CipherContext {
    let key: Vec<u8> = (0..bits / 8).map(|i| i as u8).collect();
    let mut ctx = CipherContext::new(engine).unwrap();
    ctx.set_encrypt_key(bits, &key).unwrap();
    ctx.set_decrypt_key(bits, &key).unwrap();
    ctx
}

// ---------------------------------------------------------------------------
// Single block: bare key schedule vs. through the engine
// ---------------------------------------------------------------------------

fn bench_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes-block");
    let engine = Engine::new(SoftAesEngine::new());

    for (bits, key_bits) in [(128u32, KeyBits::Aes128), (256, KeyBits::Aes256)] {
        let key: Vec<u8> = (0..bits / 8).map(|i| i as u8).collect();
        let soft = SoftAesKey::new(key_bits, &key).unwrap();
        let label = format!("aes-{bits}");

        let mut block = [0u8; 16];
        group.bench_function(format!("{label}/soft"), |b| {
            b.iter(|| soft.encrypt_block(&mut block).unwrap());
        });

        let ctx = context(&engine, bits);
        let input = [0u8; 16];
        let mut out = [0u8; 16];
        group.bench_function(format!("{label}/engine"), |b| {
            b.iter(|| ctx.crypt_block(Direction::Encrypt, &input, &mut out).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Modes of operation
// ---------------------------------------------------------------------------

fn bench_modes(c: &mut Criterion) {
    let engine = Engine::new(SoftAesEngine::new());
    let ctx = context(&engine, 128);
    let mut group = c.benchmark_group("aes-128-modes");

    for size in [1024usize, 16384] {
        group.throughput(Throughput::Bytes(size as u64));
        let input = vec![0u8; size];
        let mut output = vec![0u8; size];

        group.bench_with_input(BenchmarkId::new("ecb", size), &size, |b, _| {
            b.iter(|| ctx.crypt_ecb(Direction::Encrypt, &input, &mut output).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("cbc-encrypt", size), &size, |b, _| {
            let mut state = CbcState::new([0u8; 16]);
            b.iter(|| {
                ctx.crypt_cbc(Direction::Encrypt, &mut state, &input, &mut output)
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("cbc-decrypt", size), &size, |b, _| {
            let mut state = CbcState::new([0u8; 16]);
            b.iter(|| {
                ctx.crypt_cbc(Direction::Decrypt, &mut state, &input, &mut output)
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("cfb128", size), &size, |b, _| {
            let mut state = Cfb128State::new([0u8; 16]);
            b.iter(|| {
                ctx.crypt_cfb128(Direction::Encrypt, &mut state, &input, &mut output)
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("cfb8", size), &size, |b, _| {
            let mut state = Cfb8State::new([0u8; 16]);
            b.iter(|| {
                ctx.crypt_cfb8(Direction::Encrypt, &mut state, &input, &mut output)
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("ctr", size), &size, |b, _| {
            let mut state = CtrState::new([0u8; 16]);
            b.iter(|| ctx.crypt_ctr(&mut state, &input, &mut output).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Context lifecycle
// ---------------------------------------------------------------------------

fn bench_lifecycle(c: &mut Criterion) {
    let engine = Engine::new(SoftAesEngine::new());
    let mut group = c.benchmark_group("context");

    group.bench_function("new-free/cold", |b| {
        b.iter(|| CipherContext::new(&engine).unwrap().free().unwrap());
    });

    // A resident context keeps the engine enabled across iterations.
    let _resident = CipherContext::new(&engine).unwrap();
    group.bench_function("new-free/warm", |b| {
        b.iter(|| CipherContext::new(&engine).unwrap().free().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_block, bench_modes, bench_lifecycle);
criterion_main!(benches);
