//! Block cipher modes of operation.
//!
//! ECB, CBC, CFB-128, CFB-8 and CTR over any [`BlockCipher`](crate::provider::BlockCipher).
//! Chaining state is owned by the caller and updated in place so a stream
//! can be suspended and resumed across calls. Every function validates its
//! arguments before the first block transform; a rejected call writes
//! neither output nor chaining state.

pub mod cbc;
pub mod cfb;
pub mod ctr;
pub mod ecb;

pub use cbc::CbcState;
pub use cfb::{Cfb128State, Cfb8State};
pub use ctr::CtrState;

use aesmux_types::{CipherError, CipherMode, AES_BLOCK_SIZE};

/// `output` must have room for all of `input`.
pub(crate) fn check_output(input: &[u8], output: &[u8]) -> Result<(), CipherError> {
    if output.len() < input.len() {
        return Err(CipherError::BufferTooSmall {
            need: input.len(),
            got: output.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_aligned(mode: CipherMode, input: &[u8]) -> Result<(), CipherError> {
    if input.len() % AES_BLOCK_SIZE != 0 {
        return Err(CipherError::InvalidInputLength {
            mode,
            len: input.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_offset(offset: usize) -> Result<(), CipherError> {
    if offset >= AES_BLOCK_SIZE {
        return Err(CipherError::InvalidOffset(offset));
    }
    Ok(())
}

/// Byte loop shared by the offset-based stream modes.
///
/// `refresh` regenerates the block material whenever the position is 0,
/// `step` maps one input byte at the current position to an output byte.
/// `pos` is advanced past every byte produced, also when `refresh` fails
/// part way through.
pub(crate) fn stream_bytes<T>(
    state: &mut T,
    pos: &mut usize,
    input: &[u8],
    output: &mut [u8],
    mut refresh: impl FnMut(&mut T) -> Result<(), CipherError>,
    mut step: impl FnMut(&mut T, usize, u8) -> u8,
) -> Result<(), CipherError> {
    for (out, &byte) in output.iter_mut().zip(input) {
        if *pos == 0 {
            refresh(state)?;
        }
        *out = step(state, *pos, byte);
        *pos = (*pos + 1) % AES_BLOCK_SIZE;
    }
    Ok(())
}

pub(crate) fn xor_in_place(dst: &mut [u8; AES_BLOCK_SIZE], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}
