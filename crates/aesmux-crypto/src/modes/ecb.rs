//! ECB (Electronic Codebook) mode of operation.
//!
//! **Security warning**: ECB leaks plaintext structure. It is the unit every
//! other mode is built from and is exposed for low-level use only.

use aesmux_types::{CipherError, CipherMode, Direction, AES_BLOCK_SIZE};

use super::{check_aligned, check_output};
use crate::provider::BlockCipher;

/// Transform exactly one block.
pub fn ecb_block<C: BlockCipher + ?Sized>(
    cipher: &C,
    direction: Direction,
    input: &[u8; AES_BLOCK_SIZE],
    output: &mut [u8; AES_BLOCK_SIZE],
) -> Result<(), CipherError> {
    let mut block = *input;
    match direction {
        Direction::Encrypt => cipher.encrypt_block(&mut block)?,
        Direction::Decrypt => cipher.decrypt_block(&mut block)?,
    }
    *output = block;
    Ok(())
}

/// Transform a block-aligned buffer, one independent block at a time.
pub fn ecb_crypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    direction: Direction,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_aligned(CipherMode::Ecb, input)?;
    check_output(input, output)?;

    for (src, dst) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        let mut block = [0u8; AES_BLOCK_SIZE];
        block.copy_from_slice(src);
        match direction {
            Direction::Encrypt => cipher.encrypt_block(&mut block)?,
            Direction::Decrypt => cipher.decrypt_block(&mut block)?,
        }
        dst.copy_from_slice(&block);
    }
    Ok(())
}
