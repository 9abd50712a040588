use core::fmt;

use crate::error::CipherError;

/// AES block size in bytes (128 bits).
pub const AES_BLOCK_SIZE: usize = 16;

/// Largest AES key in bytes (AES-256).
pub const AES_MAX_KEY_SIZE: usize = 32;

/// Direction of a block transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => f.write_str("encrypt"),
            Direction::Decrypt => f.write_str("decrypt"),
        }
    }
}

/// Supported AES key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyBits {
    Aes128,
    Aes192,
    Aes256,
}

impl KeyBits {
    /// Map a key size in bits to a [`KeyBits`].
    ///
    /// Only 128, 192 and 256 are accepted.
    pub fn from_bits(bits: u32) -> Result<Self, CipherError> {
        match bits {
            128 => Ok(KeyBits::Aes128),
            192 => Ok(KeyBits::Aes192),
            256 => Ok(KeyBits::Aes256),
            _ => Err(CipherError::InvalidKeyLength { bits }),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            KeyBits::Aes128 => 128,
            KeyBits::Aes192 => 192,
            KeyBits::Aes256 => 256,
        }
    }

    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Number of AES rounds for this key size.
    pub fn rounds(self) -> usize {
        match self {
            KeyBits::Aes128 => 10,
            KeyBits::Aes192 => 12,
            KeyBits::Aes256 => 14,
        }
    }
}

/// Block cipher modes of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    Ecb,
    Cbc,
    Cfb128,
    Cfb8,
    Ctr,
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CipherMode::Ecb => "ecb",
            CipherMode::Cbc => "cbc",
            CipherMode::Cfb128 => "cfb128",
            CipherMode::Cfb8 => "cfb8",
            CipherMode::Ctr => "ctr",
        };
        f.write_str(name)
    }
}
