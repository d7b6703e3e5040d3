//! Marketplace participant records.
//!
//! A participant is created exactly once, at registration, and is never
//! deleted. Sale proceeds accumulate in the pooled `pending` balance and
//! leave only through withdrawal.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// A registered marketplace participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// The participant's ledger identity.
    pub account: Address,
    /// Unique display name claimed at registration. Immutable.
    pub display_name: String,
    /// Escrowed sale proceeds awaiting withdrawal, pooled across all of
    /// this participant's sales.
    pub pending: U256,
}

impl Participant {
    /// Create a fresh participant with no pending proceeds.
    #[must_use]
    pub fn new(account: Address, display_name: impl Into<String>) -> Self {
        Self {
            account,
            display_name: display_name.into(),
            pending: U256::ZERO,
        }
    }

    /// Whether this participant has proceeds awaiting withdrawal.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_zero()
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.account)
    }
}
