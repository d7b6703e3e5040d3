//! Settlement events for the OpenSettle audit trail.
//!
//! Every successful operation emits exactly one [`SettlementEvent`]. Events
//! are appended to the ledger's audit log and returned to the caller; an
//! operation that fails emits nothing (its event is rolled back with the
//! rest of its effects).

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{ListingId, OrderDigest};

/// One entry in the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementEvent {
    /// A swap order settled: both legs transferred.
    SwapExecuted {
        digest: OrderDigest,
        initiator: Address,
        counterparty: Address,
    },
    /// The initiator retired an unsettled order.
    SwapCancelled {
        digest: OrderDigest,
        initiator: Address,
    },
    /// A new participant registered.
    ParticipantRegistered {
        account: Address,
        display_name: String,
    },
    /// A participant listed an item for sale.
    ItemListed {
        listing: ListingId,
        name: String,
        price: U256,
        owner: Address,
    },
    /// An item sold: ownership reassigned, proceeds escrowed.
    ItemSold {
        listing: ListingId,
        seller: Address,
        buyer: Address,
        price: U256,
    },
    /// A participant withdrew their pooled proceeds.
    FundsWithdrawn { account: Address, amount: U256 },
}

impl SettlementEvent {
    /// The event kind as a stable log label.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SwapExecuted { .. } => "SWAP_EXECUTED",
            Self::SwapCancelled { .. } => "SWAP_CANCELLED",
            Self::ParticipantRegistered { .. } => "PARTICIPANT_REGISTERED",
            Self::ItemListed { .. } => "ITEM_LISTED",
            Self::ItemSold { .. } => "ITEM_SOLD",
            Self::FundsWithdrawn { .. } => "FUNDS_WITHDRAWN",
        }
    }
}

impl std::fmt::Display for SettlementEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}
