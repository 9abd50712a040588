//! Shared engine lifecycle.
//!
//! One [`Engine`] owns the single physical AES device. Each context holds an
//! [`EngineLease`]; the device is enabled while at least one lease is held.
//! All device access, including the reference count, happens under one lock,
//! and every block transform runs in its own critical section together with
//! the key install that precedes it.
//!
//! A device that panics while the lock is held poisons it. The reference count
//! is only written after the device call it depends on has returned, so the
//! lock is recovered and the engine stays usable.

use std::sync::{Arc, Mutex, MutexGuard};

use aesmux_types::{CipherError, Direction, AES_BLOCK_SIZE};

use crate::key::KeyMaterial;
use crate::provider::AesDevice;

struct EngineState {
    refcount: usize,
    device: Box<dyn AesDevice>,
}

/// Reference-counted owner of the physical AES device.
pub struct Engine {
    state: Mutex<EngineState>,
}

impl Engine {
    /// Wrap a host device. The device starts out disabled.
    pub fn new<D: AesDevice + 'static>(device: D) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(EngineState {
                refcount: 0,
                device: Box::new(device),
            }),
        })
    }

    /// Take a reference on the engine, enabling the device on the first one.
    ///
    /// If enabling fails the reference count is left unchanged.
    pub fn acquire(self: &Arc<Self>) -> Result<EngineLease, CipherError> {
        let mut state = self.lock();
        if state.refcount == 0 {
            if let Err(e) = state.device.enable() {
                log::warn!("engine enable failed: {e}");
                return Err(e);
            }
            log::debug!("engine enabled");
        }
        state.refcount += 1;
        drop(state);

        Ok(EngineLease {
            engine: Arc::clone(self),
            held: true,
        })
    }

    /// Number of leases currently held.
    pub fn refcount(&self) -> usize {
        self.lock().refcount
    }

    /// The device is enabled iff at least one lease is held.
    pub fn is_enabled(&self) -> bool {
        self.refcount() > 0
    }

    /// Install `key` for `direction` and transform one block, atomically with
    /// respect to every other user of the engine.
    pub(crate) fn run_block(
        &self,
        direction: Direction,
        key: &KeyMaterial,
        block: &mut [u8; AES_BLOCK_SIZE],
    ) -> Result<(), CipherError> {
        let mut state = self.lock();
        if state.refcount == 0 {
            return Err(CipherError::EngineUnavailable("engine not acquired"));
        }
        state
            .device
            .install_key(direction, key.bits(), key.as_bytes())?;
        state.device.transform_block(direction, block)
    }

    fn release(&self) -> Result<(), CipherError> {
        let mut state = self.lock();
        debug_assert!(state.refcount > 0);
        if state.refcount == 1 {
            // Still enabled on failure, so the reference being dropped is kept.
            if let Err(e) = state.device.disable() {
                log::warn!("engine disable failed: {e}");
                return Err(e);
            }
            log::debug!("engine disabled");
        }
        state.refcount = state.refcount.saturating_sub(1);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            log::warn!("engine lock poisoned by a panicking holder, recovering");
            self.state.clear_poison();
            poisoned.into_inner()
        })
    }
}

/// A held reference on an [`Engine`].
///
/// Dropping a held lease releases it; a failure there can only be logged.
pub struct EngineLease {
    engine: Arc<Engine>,
    held: bool,
}

impl EngineLease {
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Give the reference back, disabling the device on the last one.
    ///
    /// Releasing twice is a no-op. On failure the lease stays held.
    pub fn release(&mut self) -> Result<(), CipherError> {
        if !self.held {
            return Ok(());
        }
        self.engine.release()?;
        self.held = false;
        Ok(())
    }
}

impl Drop for EngineLease {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("engine release on drop failed: {e}");
        }
    }
}
