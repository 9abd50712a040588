//! CTR (Counter) mode of operation.

use aesmux_types::{CipherError, AES_BLOCK_SIZE};
use zeroize::Zeroize;

use super::{check_offset, check_output, stream_bytes};
use crate::provider::BlockCipher;

/// CTR chaining state.
///
/// `nonce_counter` is the next counter block to encrypt, `stream_block` the
/// keystream currently being consumed at `offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct CtrState {
    pub nonce_counter: [u8; AES_BLOCK_SIZE],
    pub stream_block: [u8; AES_BLOCK_SIZE],
    pub offset: usize,
}

impl CtrState {
    pub fn new(nonce_counter: [u8; AES_BLOCK_SIZE]) -> Self {
        Self {
            nonce_counter,
            stream_block: [0u8; AES_BLOCK_SIZE],
            offset: 0,
        }
    }
}

/// Increment a 128-bit big-endian counter by 1.
fn increment_counter(counter: &mut [u8; AES_BLOCK_SIZE]) {
    for byte in counter.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

/// Encrypt or decrypt any number of bytes with CTR, resuming at `state.offset`.
pub fn ctr_crypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    state: &mut CtrState,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_offset(state.offset)?;
    check_output(input, output)?;

    let mut pos = state.offset;
    let result = stream_bytes(
        state,
        &mut pos,
        input,
        output,
        |s| {
            let mut block = s.nonce_counter;
            cipher.encrypt_block(&mut block)?;
            s.stream_block = block;
            increment_counter(&mut s.nonce_counter);
            Ok(())
        },
        |s, n, b| b ^ s.stream_block[n],
    );
    state.offset = pos;
    result
}
