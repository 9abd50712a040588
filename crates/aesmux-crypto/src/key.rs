//! Per-context key schedule state.
//!
//! Setting a key only records it. The engine is programmed with a recorded
//! key right before each block transform, see [`Engine`](crate::engine::Engine).

use core::fmt;

use aesmux_types::{CipherError, Direction, KeyBits, AES_MAX_KEY_SIZE};
use zeroize::Zeroize;

/// Raw key bytes together with their size.
#[derive(Clone)]
pub struct KeyMaterial {
    bits: KeyBits,
    bytes: [u8; AES_MAX_KEY_SIZE],
}

impl KeyMaterial {
    /// `key` must be exactly `bits / 8` bytes long.
    pub fn new(bits: KeyBits, key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != bits.key_len() {
            return Err(CipherError::InvalidKeyLength {
                bits: (key.len() * 8) as u32,
            });
        }
        let mut bytes = [0u8; AES_MAX_KEY_SIZE];
        bytes[..key.len()].copy_from_slice(key);
        Ok(Self { bits, bytes })
    }

    pub fn bits(&self) -> KeyBits {
        self.bits
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bits.key_len()]
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bits", &self.bits.bits())
            .finish_non_exhaustive()
    }
}

/// Key slot for one direction.
#[derive(Debug, Clone, Default)]
pub enum KeySlot {
    #[default]
    Unset,
    Set(KeyMaterial),
}

/// Encrypt and decrypt key slots of one context. The two are independent.
#[derive(Debug, Clone, Default)]
pub struct KeySchedule {
    encrypt: KeySlot,
    decrypt: KeySlot,
}

impl KeySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key for `direction`, replacing any previous one.
    pub fn set(&mut self, direction: Direction, bits: u32, key: &[u8]) -> Result<(), CipherError> {
        let material = KeyMaterial::new(KeyBits::from_bits(bits)?, key)?;
        // The replaced material is zeroized when dropped here.
        *self.slot_mut(direction) = KeySlot::Set(material);
        Ok(())
    }

    pub fn get(&self, direction: Direction) -> Result<&KeyMaterial, CipherError> {
        match self.slot(direction) {
            KeySlot::Set(material) => Ok(material),
            KeySlot::Unset => Err(CipherError::KeyNotSet(direction)),
        }
    }

    pub fn is_set(&self, direction: Direction) -> bool {
        matches!(self.slot(direction), KeySlot::Set(_))
    }

    /// Zeroize both slots and mark them unset.
    pub fn clear(&mut self) {
        self.encrypt = KeySlot::Unset;
        self.decrypt = KeySlot::Unset;
    }

    fn slot(&self, direction: Direction) -> &KeySlot {
        match direction {
            Direction::Encrypt => &self.encrypt,
            Direction::Decrypt => &self.decrypt,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut KeySlot {
        match direction {
            Direction::Encrypt => &mut self.encrypt,
            Direction::Decrypt => &mut self.decrypt,
        }
    }
}
