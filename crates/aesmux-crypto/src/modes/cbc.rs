//! CBC (Cipher Block Chaining) mode of operation.
//!
//! No padding: input must be a whole number of blocks.

use aesmux_types::{CipherError, CipherMode, AES_BLOCK_SIZE};
use zeroize::Zeroize;

use super::{check_aligned, check_output, xor_in_place};
use crate::provider::BlockCipher;

/// CBC chaining state. After a call `iv` holds the last ciphertext block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct CbcState {
    pub iv: [u8; AES_BLOCK_SIZE],
}

impl CbcState {
    pub fn new(iv: [u8; AES_BLOCK_SIZE]) -> Self {
        Self { iv }
    }
}

/// Encrypt `input` into `output` with CBC.
pub fn cbc_encrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    state: &mut CbcState,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_aligned(CipherMode::Cbc, input)?;
    check_output(input, output)?;

    for (pt, ct) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        let mut block = state.iv;
        xor_in_place(&mut block, pt);
        cipher.encrypt_block(&mut block)?;
        ct.copy_from_slice(&block);
        state.iv = block;
    }
    Ok(())
}

/// Decrypt `input` into `output` with CBC.
pub fn cbc_decrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    state: &mut CbcState,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_aligned(CipherMode::Cbc, input)?;
    check_output(input, output)?;

    for (ct, pt) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        let mut saved = [0u8; AES_BLOCK_SIZE];
        saved.copy_from_slice(ct);
        let mut block = saved;
        cipher.decrypt_block(&mut block)?;
        xor_in_place(&mut block, &state.iv);
        pt.copy_from_slice(&block);
        state.iv = saved;
    }
    Ok(())
}
