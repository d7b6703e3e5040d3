//! Process-wide ledger state.
//!
//! [`LedgerState`] owns everything the engines operate on: the asset book,
//! the swap settlement records, the marketplace records, and the audit
//! event log. It is created empty at startup and lives for the whole
//! process; there is no teardown.
//!
//! The container is `Clone` because cloning **is** the atomicity
//! mechanism: [`transact`](crate::transact) checkpoints the state before
//! an operation and restores the checkpoint if the operation fails.

use std::collections::{BTreeMap, HashMap, HashSet};

use alloy_primitives::{Address, U256};
use opensettle_types::{
    Listing, ListingId, OrderDigest, Participant, Result, SettleError, SettlementEvent,
    SettlementStatus, constants,
};

use crate::assets::AssetBook;
use crate::reentry::ReentryLock;

// ---------------------------------------------------------------------------
// SwapRecords
// ---------------------------------------------------------------------------

/// Terminal settlement records for swap orders, keyed by digest.
///
/// The executed and cancelled sets are append-only and never evicted:
/// forgetting a settled digest would reopen it for replay.
#[derive(Debug, Clone, Default)]
pub struct SwapRecords {
    executed: HashSet<OrderDigest>,
    cancelled: HashSet<OrderDigest>,
    /// Re-entry lock for the swap engine.
    pub lock: ReentryLock,
}

impl SwapRecords {
    /// The current status of an order digest. Unknown digests are
    /// [`SettlementStatus::Unseen`].
    #[must_use]
    pub fn status(&self, digest: OrderDigest) -> SettlementStatus {
        if self.executed.contains(&digest) {
            SettlementStatus::Executed
        } else if self.cancelled.contains(&digest) {
            SettlementStatus::Cancelled
        } else {
            SettlementStatus::Unseen
        }
    }

    /// Flip a digest to EXECUTED.
    ///
    /// # Errors
    /// Returns [`SettleError::AlreadySettled`] if the digest already has a
    /// terminal record (executed or cancelled).
    pub fn mark_executed(&mut self, digest: OrderDigest) -> Result<()> {
        if self.status(digest).is_settled() {
            return Err(SettleError::AlreadySettled(digest));
        }
        self.executed.insert(digest);
        Ok(())
    }

    /// Flip a digest to CANCELLED.
    ///
    /// # Errors
    /// Returns [`SettleError::AlreadySettled`] if the digest already has a
    /// terminal record (executed or cancelled).
    pub fn mark_cancelled(&mut self, digest: OrderDigest) -> Result<()> {
        if self.status(digest).is_settled() {
            return Err(SettleError::AlreadySettled(digest));
        }
        self.cancelled.insert(digest);
        Ok(())
    }

    /// Number of terminal records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executed.len() + self.cancelled.len()
    }

    /// Whether no order has settled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty() && self.cancelled.is_empty()
    }
}

// ---------------------------------------------------------------------------
// MarketRecords
// ---------------------------------------------------------------------------

/// Marketplace records: participants, claimed names, listings.
#[derive(Debug, Clone)]
pub struct MarketRecords {
    participants: HashMap<Address, Participant>,
    /// Claimed display names. Kept in lockstep with `participants`.
    names: HashMap<String, Address>,
    listings: BTreeMap<ListingId, Listing>,
    next_listing: ListingId,
    /// Re-entry lock for the market engine.
    pub lock: ReentryLock,
}

impl Default for MarketRecords {
    fn default() -> Self {
        Self {
            participants: HashMap::new(),
            names: HashMap::new(),
            listings: BTreeMap::new(),
            next_listing: ListingId(constants::FIRST_LISTING_ID),
            lock: ReentryLock::new(),
        }
    }
}

impl MarketRecords {
    /// Whether an account holds a registration.
    #[must_use]
    pub fn is_registered(&self, account: Address) -> bool {
        self.participants.contains_key(&account)
    }

    /// Register a new participant.
    ///
    /// Checks run in a fixed order: an already-registered account fails
    /// [`SettleError::AlreadyRegistered`] even if it also picked a taken
    /// name; only fresh accounts get as far as the name check.
    pub fn register(&mut self, account: Address, name: &str) -> Result<()> {
        if self.is_registered(account) {
            return Err(SettleError::AlreadyRegistered(account));
        }
        if self.names.contains_key(name) {
            return Err(SettleError::NameTaken { name: name.into() });
        }
        self.participants
            .insert(account, Participant::new(account, name));
        self.names.insert(name.into(), account);
        Ok(())
    }

    /// Look up a participant.
    #[must_use]
    pub fn participant(&self, account: Address) -> Option<&Participant> {
        self.participants.get(&account)
    }

    /// Mutable participant access (escrow credit and drain).
    pub fn participant_mut(&mut self, account: Address) -> Option<&mut Participant> {
        self.participants.get_mut(&account)
    }

    /// Store a new listing under the next monotonic id.
    pub fn insert_listing(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        price: U256,
        owner: Address,
    ) -> ListingId {
        let id = self.next_listing;
        self.next_listing = id.next();
        self.listings
            .insert(id, Listing::new(id, name, description, price, owner));
        id
    }

    /// Look up a listing.
    #[must_use]
    pub fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.get(&id)
    }

    /// Mutable listing access (the sale flip).
    pub fn listing_mut(&mut self, id: ListingId) -> Option<&mut Listing> {
        self.listings.get_mut(&id)
    }

    /// All listings in id order.
    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }
}

// ---------------------------------------------------------------------------
// LedgerState
// ---------------------------------------------------------------------------

/// The whole-process state container.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    /// Host asset balances.
    pub assets: AssetBook,
    /// Swap settlement records.
    pub swaps: SwapRecords,
    /// Marketplace records.
    pub market: MarketRecords,
    events: Vec<SettlementEvent>,
}

impl LedgerState {
    /// Create the empty startup state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the audit log.
    pub fn record(&mut self, event: SettlementEvent) {
        self.events.push(event);
    }

    /// The audit log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SettlementEvent] {
        &self.events
    }
}
