//! Known Answer Tests run through an engine.
//!
//! Each KAT drives one context through the shared engine with a known input
//! and compares the output with the published value (FIPS 197, NIST SP
//! 800-38A). Useful right after bringing up a new host device.

use std::sync::Arc;

use aesmux_types::{CipherError, Direction, AES_BLOCK_SIZE};
use hex_literal::hex;
use subtle::ConstantTimeEq;

use crate::context::CipherContext;
use crate::engine::Engine;
use crate::modes::CbcState;

struct BlockKat {
    name: &'static str,
    bits: u32,
    key: &'static [u8],
    pt: [u8; AES_BLOCK_SIZE],
    ct: [u8; AES_BLOCK_SIZE],
}

const BLOCK_KATS: [BlockKat; 3] = [
    // FIPS 197 Appendix C.1
    BlockKat {
        name: "AES-128 block",
        bits: 128,
        key: &hex!("000102030405060708090a0b0c0d0e0f"),
        pt: hex!("00112233445566778899aabbccddeeff"),
        ct: hex!("69c4e0d86a7b0430d8cdb78070b4c55a"),
    },
    // FIPS 197 Appendix C.2
    BlockKat {
        name: "AES-192 block",
        bits: 192,
        key: &hex!("000102030405060708090a0b0c0d0e0f1011121314151617"),
        pt: hex!("00112233445566778899aabbccddeeff"),
        ct: hex!("dda97ca4864cdfe06eaf70a0ec0d7191"),
    },
    // FIPS 197 Appendix C.3
    BlockKat {
        name: "AES-256 block",
        bits: 256,
        key: &hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"),
        pt: hex!("00112233445566778899aabbccddeeff"),
        ct: hex!("8ea2b7ca516745bfeafc49904b496089"),
    },
];

/// Run all KATs against `engine`. Returns on first failure.
pub fn self_test(engine: &Arc<Engine>) -> Result<(), CipherError> {
    let mut ctx = CipherContext::new(engine)?;
    for kat in &BLOCK_KATS {
        kat_block(&mut ctx, kat)?;
    }
    kat_cbc(&mut ctx)?;
    ctx.free()?;
    log::debug!("engine self test passed");
    Ok(())
}

fn kat_block(ctx: &mut CipherContext, kat: &BlockKat) -> Result<(), CipherError> {
    ctx.set_encrypt_key(kat.bits, kat.key)?;
    ctx.set_decrypt_key(kat.bits, kat.key)?;

    let mut out = [0u8; AES_BLOCK_SIZE];
    ctx.crypt_block(Direction::Encrypt, &kat.pt, &mut out)?;
    if !bool::from(out[..].ct_eq(&kat.ct[..])) {
        return Err(CipherError::SelfTestFailed(kat.name));
    }
    ctx.crypt_block(Direction::Decrypt, &kat.ct, &mut out)?;
    if !bool::from(out[..].ct_eq(&kat.pt[..])) {
        return Err(CipherError::SelfTestFailed(kat.name));
    }
    Ok(())
}

/// NIST SP 800-38A F.2.1 / F.2.2, first block.
fn kat_cbc(ctx: &mut CipherContext) -> Result<(), CipherError> {
    let key = hex!("2b7e151628aed2a6abf7158809cf4f3c");
    let iv = hex!("000102030405060708090a0b0c0d0e0f");
    let pt = hex!("6bc1bee22e409f96e93d7e117393172a");
    let ct = hex!("7649abac8119b246cee98e9b12e9197d");
    ctx.set_encrypt_key(128, &key)?;
    ctx.set_decrypt_key(128, &key)?;

    let mut out = [0u8; AES_BLOCK_SIZE];
    ctx.crypt_cbc(Direction::Encrypt, &mut CbcState::new(iv), &pt, &mut out)?;
    if !bool::from(out[..].ct_eq(&ct[..])) {
        return Err(CipherError::SelfTestFailed("AES-128 CBC"));
    }
    ctx.crypt_cbc(Direction::Decrypt, &mut CbcState::new(iv), &ct, &mut out)?;
    if !bool::from(out[..].ct_eq(&pt[..])) {
        return Err(CipherError::SelfTestFailed("AES-128 CBC"));
    }
    Ok(())
}
