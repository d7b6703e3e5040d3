//! # Settlement status — the exactly-once state machine
//!
//! Every swap order digest is in exactly one of three states:
//!
//! ```text
//!   ┌────────┐  executeSwap  ┌──────────┐
//!   │ UNSEEN ├──────────────▶│ EXECUTED │
//!   └───┬────┘               └──────────┘
//!       │ cancelSwap
//!       ▼
//!   ┌───────────┐
//!   │ CANCELLED │
//!   └───────────┘
//! ```
//!
//! `Unseen` is implicit (no record exists); the terminal states are
//! persisted. Both transitions are one-way: once an order is executed it
//! can never be cancelled, and once cancelled it can never be executed.
//! That monotonicity is the replay and double-settlement guarantee.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a swap order, keyed by its digest.
///
/// Transitions are **monotonic** (never go backwards):
/// - `Unseen → Executed` (counterparty triggered settlement)
/// - `Unseen → Cancelled` (initiator retired the order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementStatus {
    /// No terminal record exists. The order may still settle or cancel.
    Unseen,
    /// Settlement ran to completion. **Irreversible.**
    Executed,
    /// The initiator retired the order before settlement. **Irreversible.**
    Cancelled,
}

impl SettlementStatus {
    /// Can an order in this state transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Unseen, Self::Executed | Self::Cancelled)
        )
    }

    /// Returns `true` if this is a terminal state.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Unseen)
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unseen => write!(f, "UNSEEN"),
            Self::Executed => write!(f, "EXECUTED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}
