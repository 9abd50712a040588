#![forbid(unsafe_code)]
#![doc = "Block cipher modes of operation over a shared, reference-counted AES engine."]

// Host boundary
pub mod provider;

// Engine lifecycle and per-context keys
pub mod engine;
pub mod key;

// Modes of operation
pub mod modes;

pub mod context;

// Software device
#[cfg(feature = "soft-engine")]
pub mod aes;

// Self test
#[cfg(feature = "self-test")]
pub mod kat;

pub use context::CipherContext;
pub use engine::{Engine, EngineLease};
pub use modes::{CbcState, Cfb128State, Cfb8State, CtrState};

pub use aesmux_types::{CipherError, CipherMode, Direction, KeyBits, AES_BLOCK_SIZE};
