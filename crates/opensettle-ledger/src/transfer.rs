//! The untrusted asset-transfer primitive.
//!
//! Value movement is delegated to third-party code behind the
//! [`AssetTransfer`] trait. Implementations are **untrusted**: they may
//! decline any leg, and because they receive the full ledger state they
//! can call back into any engine mid-transfer. Engines must stay safe
//! against both, which is why they flip their own records before invoking
//! a transfer, hold a re-entry lock across it, and run everything inside a
//! transaction.
//!
//! [`DirectTransfer`] is the honest built-in implementation: it moves
//! asset-book balances and declines only when funds are missing.

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::state::LedgerState;

/// One transfer instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLeg {
    /// The asset to move.
    pub asset: Address,
    /// Paying account.
    pub from: Address,
    /// Receiving account.
    pub to: Address,
    /// Amount, in the asset's smallest unit.
    pub amount: U256,
}

impl std::fmt::Display for TransferLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x{} {} -> {}",
            self.asset, self.amount, self.from, self.to
        )
    }
}

/// A transfer implementation declined a leg.
///
/// This is the only thing untrusted code can tell the engine; the engine
/// maps it into its own error taxonomy and rolls the operation back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct TransferDeclined {
    /// Implementation-provided reason, reproduced verbatim in the
    /// engine error.
    pub reason: String,
}

impl TransferDeclined {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The third-party transfer primitive.
///
/// The receiver is `&mut self` so implementations can keep call journals;
/// the `state` parameter is the live ledger, which is what makes re-entry
/// physically possible and therefore worth defending against.
pub trait AssetTransfer {
    /// Execute one transfer leg, or decline it.
    fn transfer(
        &mut self,
        state: &mut LedgerState,
        leg: &TransferLeg,
    ) -> std::result::Result<(), TransferDeclined>;
}

/// Honest transfer backend over the asset book.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTransfer;

impl AssetTransfer for DirectTransfer {
    fn transfer(
        &mut self,
        state: &mut LedgerState,
        leg: &TransferLeg,
    ) -> std::result::Result<(), TransferDeclined> {
        state
            .assets
            .transfer(leg.asset, leg.from, leg.to, leg.amount)
            .map_err(|e| TransferDeclined::new(e.to_string()))
    }
}
