use crate::algorithm::{CipherMode, Direction};

/// Cipher engine errors.
///
/// Every variant is reported before the engine is touched, except
/// `EngineUnavailable` raised by the host device itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    // Key errors
    #[error("invalid key length: {bits} bits")]
    InvalidKeyLength { bits: u32 },
    #[error("{0} key not set")]
    KeyNotSet(Direction),

    // Buffer errors
    #[error("{mode}: input length {len} is not a multiple of the block size")]
    InvalidInputLength { mode: CipherMode, len: usize },
    #[error("buffer length not enough: need {need}, got {got}")]
    BufferTooSmall { need: usize, got: usize },
    #[error("invalid stream offset: {0}")]
    InvalidOffset(usize),

    // Engine errors
    #[error("engine unavailable: {0}")]
    EngineUnavailable(&'static str),
    #[error("self test failed: {0}")]
    SelfTestFailed(&'static str),
}
