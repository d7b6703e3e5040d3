//! Per-call host context.
//!
//! The host environment hands every externally triggered operation three
//! ambient facts: who is calling, the block-scoped timestamp, and how much
//! native coin travelled with the call. Engines read them from a
//! [`CallContext`] instead of global state, which keeps every entry point
//! a pure function of its inputs.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// The host-provided facts for one external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// The authenticated caller identity.
    pub caller: Address,
    /// Block-scoped timestamp, seconds. Constant for the whole call.
    pub now: u64,
    /// Native coin attached to the call. Zero unless the caller sent value.
    pub attached: U256,
}

impl CallContext {
    /// Context for a plain call with no attached value.
    #[must_use]
    pub fn new(caller: Address, now: u64) -> Self {
        Self {
            caller,
            now,
            attached: U256::ZERO,
        }
    }

    /// Attach native coin to the call (builder style).
    #[must_use]
    pub fn with_attached(mut self, amount: U256) -> Self {
        self.attached = amount;
        self
    }
}
