//! Trait-based interfaces at the engine boundary.
//!
//! The host supplies the block primitive and power control of the physical
//! AES device. The mode engine is written against [`BlockCipher`], which is
//! implemented by a context key bound to the shared engine and by the
//! software AES key.

use aesmux_types::{CipherError, Direction, KeyBits, AES_BLOCK_SIZE};

/// Single-block primitive of the physical engine.
///
/// The device holds at most one key schedule at a time.
pub trait BlockPrimitive {
    /// Program the key schedule used by subsequent transforms in `direction`.
    fn install_key(
        &mut self,
        direction: Direction,
        bits: KeyBits,
        key: &[u8],
    ) -> Result<(), CipherError>;

    /// Transform one block in place with the installed key schedule.
    fn transform_block(
        &mut self,
        direction: Direction,
        block: &mut [u8; AES_BLOCK_SIZE],
    ) -> Result<(), CipherError>;
}

/// Power control of the physical engine.
///
/// Only called on refcount 0 -> 1 and 1 -> 0 edges.
pub trait PowerControl {
    fn enable(&mut self) -> Result<(), CipherError>;

    fn disable(&mut self) -> Result<(), CipherError>;
}

/// A complete host device: block primitive plus power control.
pub trait AesDevice: BlockPrimitive + PowerControl + Send {}

impl<T: BlockPrimitive + PowerControl + Send> AesDevice for T {}

/// A keyed 128-bit block cipher.
pub trait BlockCipher {
    /// Encrypt a single block in place.
    fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) -> Result<(), CipherError>;

    /// Decrypt a single block in place.
    fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) -> Result<(), CipherError>;
}
