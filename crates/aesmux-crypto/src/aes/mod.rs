//! Software AES device.
//!
//! [`SoftAesEngine`] implements both host capabilities on top of the
//! table-lookup AES in [`soft`]. It behaves like the physical engine: one key
//! schedule at a time, bound to a direction, and no transforms while powered
//! down.

pub mod soft;

pub use soft::SoftAesKey;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aesmux_types::{CipherError, Direction, KeyBits, AES_BLOCK_SIZE};

use crate::provider::{BlockPrimitive, PowerControl};

/// Call counters of a [`SoftAesEngine`], shared so they stay readable after
/// the device has been moved into an [`Engine`](crate::engine::Engine).
#[derive(Debug, Default)]
pub struct EngineCounters {
    enables: AtomicUsize,
    disables: AtomicUsize,
    key_installs: AtomicUsize,
    blocks: AtomicUsize,
}

impl EngineCounters {
    pub fn enables(&self) -> usize {
        self.enables.load(Ordering::SeqCst)
    }

    pub fn disables(&self) -> usize {
        self.disables.load(Ordering::SeqCst)
    }

    pub fn key_installs(&self) -> usize {
        self.key_installs.load(Ordering::SeqCst)
    }

    pub fn blocks(&self) -> usize {
        self.blocks.load(Ordering::SeqCst)
    }
}

/// Software stand-in for the hardware AES engine.
#[derive(Default)]
pub struct SoftAesEngine {
    enabled: bool,
    installed: Option<(Direction, SoftAesKey)>,
    counters: Arc<EngineCounters>,
}

impl SoftAesEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> Arc<EngineCounters> {
        Arc::clone(&self.counters)
    }
}

impl BlockPrimitive for SoftAesEngine {
    fn install_key(
        &mut self,
        direction: Direction,
        bits: KeyBits,
        key: &[u8],
    ) -> Result<(), CipherError> {
        if !self.enabled {
            return Err(CipherError::EngineUnavailable("engine disabled"));
        }
        self.installed = Some((direction, SoftAesKey::new(bits, key)?));
        self.counters.key_installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn transform_block(
        &mut self,
        direction: Direction,
        block: &mut [u8; AES_BLOCK_SIZE],
    ) -> Result<(), CipherError> {
        if !self.enabled {
            return Err(CipherError::EngineUnavailable("engine disabled"));
        }
        let key = match &self.installed {
            Some((installed, key)) if *installed == direction => key,
            Some(_) => {
                return Err(CipherError::EngineUnavailable(
                    "key schedule installed for the other direction",
                ))
            }
            None => return Err(CipherError::EngineUnavailable("no key schedule installed")),
        };
        match direction {
            Direction::Encrypt => key.encrypt(block),
            Direction::Decrypt => key.decrypt(block),
        }
        self.counters.blocks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl PowerControl for SoftAesEngine {
    fn enable(&mut self) -> Result<(), CipherError> {
        self.enabled = true;
        self.counters.enables.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), CipherError> {
        // Dropping the schedule zeroizes it.
        self.installed = None;
        self.enabled = false;
        self.counters.disables.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
