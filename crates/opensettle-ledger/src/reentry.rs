//! Re-entry lock.
//!
//! Guarded operations hand control to untrusted transfer code mid-call.
//! That code can call back into the engine before the outer call finishes.
//! The lock turns any such nested entry into an immediate
//! [`SettleError::ReentrantCall`] instead of letting it observe or mutate
//! an operation in flight.
//!
//! The lock lives inside the checkpointed ledger state, so a failed outer
//! call restores it to released along with everything else. The success
//! path must release it explicitly.

use opensettle_types::{Result, SettleError};

/// A single-engine re-entry lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReentryLock {
    held: bool,
}

impl ReentryLock {
    /// Create a released lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock.
    ///
    /// # Errors
    /// Returns [`SettleError::ReentrantCall`] if the lock is already held.
    pub fn enter(&mut self) -> Result<()> {
        if self.held {
            tracing::warn!("re-entrant call rejected");
            return Err(SettleError::ReentrantCall);
        }
        self.held = true;
        Ok(())
    }

    /// Release the lock.
    pub fn exit(&mut self) {
        self.held = false;
    }

    /// Whether the lock is currently held.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }
}
