//! Logical cipher contexts over the shared engine.
//!
//! A [`CipherContext`] holds one engine lease and its own encrypt and decrypt
//! keys. Keys are installed on the device before every block transform, so
//! any number of contexts can interleave on one engine.

use std::sync::Arc;

use aesmux_types::{CipherError, CipherMode, Direction, AES_BLOCK_SIZE};

use crate::engine::{Engine, EngineLease};
use crate::key::{KeyMaterial, KeySchedule};
use crate::modes::{cbc, cfb, ctr, ecb, CbcState, Cfb128State, Cfb8State, CtrState};
use crate::provider::BlockCipher;

/// A context key bound to the engine for the duration of one call.
struct EngineCipher<'a> {
    engine: &'a Engine,
    key: &'a KeyMaterial,
}

impl BlockCipher for EngineCipher<'_> {
    fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) -> Result<(), CipherError> {
        self.engine.run_block(Direction::Encrypt, self.key, block)
    }

    fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) -> Result<(), CipherError> {
        self.engine.run_block(Direction::Decrypt, self.key, block)
    }
}

/// A logical AES context sharing one physical engine.
///
/// Not meant to be shared between threads mid-operation; chaining state is
/// passed in by the caller.
pub struct CipherContext {
    keys: KeySchedule,
    lease: EngineLease,
}

impl CipherContext {
    /// Create a context with no keys, taking a reference on `engine`.
    pub fn new(engine: &Arc<Engine>) -> Result<Self, CipherError> {
        Ok(Self {
            keys: KeySchedule::new(),
            lease: engine.acquire()?,
        })
    }

    /// Record the key for `direction`. The engine is not touched.
    pub fn set_key(&mut self, direction: Direction, bits: u32, key: &[u8]) -> Result<(), CipherError> {
        self.keys.set(direction, bits, key)
    }

    pub fn set_encrypt_key(&mut self, bits: u32, key: &[u8]) -> Result<(), CipherError> {
        self.set_key(Direction::Encrypt, bits, key)
    }

    pub fn set_decrypt_key(&mut self, bits: u32, key: &[u8]) -> Result<(), CipherError> {
        self.set_key(Direction::Decrypt, bits, key)
    }

    pub fn has_key(&self, direction: Direction) -> bool {
        self.keys.is_set(direction)
    }

    pub fn engine(&self) -> &Arc<Engine> {
        self.lease.engine()
    }

    /// ECB on exactly one block.
    pub fn crypt_block(
        &self,
        direction: Direction,
        input: &[u8; AES_BLOCK_SIZE],
        output: &mut [u8; AES_BLOCK_SIZE],
    ) -> Result<(), CipherError> {
        let cipher = self.cipher(direction)?;
        log::trace!("{} {direction}: single block", CipherMode::Ecb);
        ecb::ecb_block(&cipher, direction, input, output)
    }

    /// ECB over a block-aligned buffer.
    pub fn crypt_ecb(&self, direction: Direction, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        let cipher = self.cipher(direction)?;
        log::trace!("{} {direction}: {} bytes", CipherMode::Ecb, input.len());
        ecb::ecb_crypt(&cipher, direction, input, output)
    }

    /// CBC over a block-aligned buffer. Uses the key of `direction`.
    pub fn crypt_cbc(
        &self,
        direction: Direction,
        state: &mut CbcState,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CipherError> {
        let cipher = self.cipher(direction)?;
        log::trace!("{} {direction}: {} bytes", CipherMode::Cbc, input.len());
        match direction {
            Direction::Encrypt => cbc::cbc_encrypt(&cipher, state, input, output),
            Direction::Decrypt => cbc::cbc_decrypt(&cipher, state, input, output),
        }
    }

    /// CFB-128 over any length. Uses the encrypt key in both directions.
    pub fn crypt_cfb128(
        &self,
        direction: Direction,
        state: &mut Cfb128State,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CipherError> {
        let cipher = self.cipher(Direction::Encrypt)?;
        log::trace!("{} {direction}: {} bytes", CipherMode::Cfb128, input.len());
        match direction {
            Direction::Encrypt => cfb::cfb128_encrypt(&cipher, state, input, output),
            Direction::Decrypt => cfb::cfb128_decrypt(&cipher, state, input, output),
        }
    }

    /// CFB-8 over any length. Uses the encrypt key in both directions.
    pub fn crypt_cfb8(
        &self,
        direction: Direction,
        state: &mut Cfb8State,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CipherError> {
        let cipher = self.cipher(Direction::Encrypt)?;
        log::trace!("{} {direction}: {} bytes", CipherMode::Cfb8, input.len());
        match direction {
            Direction::Encrypt => cfb::cfb8_encrypt(&cipher, state, input, output),
            Direction::Decrypt => cfb::cfb8_decrypt(&cipher, state, input, output),
        }
    }

    /// CTR over any length; encryption and decryption are the same operation.
    pub fn crypt_ctr(&self, state: &mut CtrState, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        let cipher = self.cipher(Direction::Encrypt)?;
        log::trace!("{}: {} bytes", CipherMode::Ctr, input.len());
        ctr::ctr_crypt(&cipher, state, input, output)
    }

    /// Zeroize both keys and release the engine reference.
    ///
    /// If the release fails the error is returned and dropping the context
    /// retries it once more.
    pub fn free(mut self) -> Result<(), CipherError> {
        self.keys.clear();
        self.lease.release()
    }

    fn cipher(&self, direction: Direction) -> Result<EngineCipher<'_>, CipherError> {
        Ok(EngineCipher {
            engine: self.lease.engine(),
            key: self.keys.get(direction)?,
        })
    }
}
