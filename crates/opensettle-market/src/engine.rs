//! The marketplace engine.
//!
//! Registration, listings, attached-payment sales, and pooled
//! withdrawals as guard-clause pipelines over the shared ledger state.
//! Checks run in a fixed order and the first failure aborts the whole
//! call; the transaction wrapper guarantees that an aborted call leaves
//! no trace, including the refund of any attached payment.
//!
//! ## Check order
//!
//! ```text
//!   buy:      payment lands -> registered -> available -> not own
//!             -> exact price -> flip + escrow
//!   withdraw: lock -> drain (registered, nonzero) -> payout -> unlock
//! ```
//!
//! Sale proceeds never pay out at sale time. The buyer's coins sit in
//! the market vault and the seller's pooled pending balance grows; the
//! vault pays out only through `withdraw`, which drains the pool to
//! zero **before** the payout transfer runs.

use alloy_primitives::{Address, U256};
use opensettle_ledger::{AssetTransfer, CallContext, LedgerState, TransferLeg, transact};
use opensettle_types::{
    Listing, ListingId, Result, SettleError, SettlementEvent, constants,
};

use crate::escrow;

/// Marketplace entry points.
///
/// The engine itself is a stateless config carrier; all mutable state
/// lives in the [`LedgerState`] passed to each call.
#[derive(Debug, Clone, Copy)]
pub struct MarketEngine {
    /// The vault identity. Attached payments land here at sale time and
    /// leave on withdrawal.
    account: Address,
}

impl MarketEngine {
    /// Create an engine vaulting escrowed payments under the given
    /// account.
    #[must_use]
    pub fn new(account: Address) -> Self {
        Self { account }
    }

    /// The vault account holding escrowed sale payments.
    #[must_use]
    pub fn account(&self) -> Address {
        self.account
    }

    /// Register the caller as a marketplace participant under a unique
    /// display name.
    ///
    /// # Errors
    /// - [`SettleError::AlreadyRegistered`] if the caller already holds
    ///   a registration, even under a fresh name
    /// - [`SettleError::NameTaken`] if another participant claimed the
    ///   name
    pub fn register(
        &self,
        state: &mut LedgerState,
        ctx: &CallContext,
        name: &str,
    ) -> Result<SettlementEvent> {
        transact(state, |state| {
            state.market.register(ctx.caller, name)?;

            tracing::debug!(account = %ctx.caller, name, "participant registered");
            let event = SettlementEvent::ParticipantRegistered {
                account: ctx.caller,
                display_name: name.into(),
            };
            state.record(event.clone());
            Ok(event)
        })
    }

    /// List an item for sale at a nonzero price in the native coin.
    ///
    /// The listing gets the next monotonic id and stays on record
    /// forever, flipping to unavailable when sold.
    ///
    /// # Errors
    /// - [`SettleError::NotRegistered`] if the caller holds no
    ///   registration
    /// - [`SettleError::InvalidPrice`] if `price` is zero
    pub fn list_item(
        &self,
        state: &mut LedgerState,
        ctx: &CallContext,
        name: &str,
        description: &str,
        price: U256,
    ) -> Result<SettlementEvent> {
        transact(state, |state| {
            if !state.market.is_registered(ctx.caller) {
                return Err(SettleError::NotRegistered(ctx.caller));
            }
            if price.is_zero() {
                return Err(SettleError::InvalidPrice);
            }

            let id = state
                .market
                .insert_listing(name, description, price, ctx.caller);

            tracing::debug!(listing = %id, price = %price, owner = %ctx.caller, "item listed");
            let event = SettlementEvent::ItemListed {
                listing: id,
                name: name.into(),
                price,
                owner: ctx.caller,
            };
            state.record(event.clone());
            Ok(event)
        })
    }

    /// Buy a listing with the exact price attached as native coin.
    ///
    /// The attached payment lands in the market vault before any check
    /// runs; a failed check refunds it via rollback. On success the
    /// listing flips to sold with the buyer as owner, and the price is
    /// credited to the seller's pending pool rather than paid out.
    ///
    /// # Errors
    /// - [`SettleError::InsufficientFunds`] if the caller cannot cover
    ///   the attached amount
    /// - [`SettleError::NotRegistered`] if the caller holds no
    ///   registration
    /// - [`SettleError::ItemUnavailable`] if the listing does not exist
    ///   or was already sold
    /// - [`SettleError::SelfPurchase`] if the caller owns the listing
    /// - [`SettleError::WrongPaymentAmount`] if the attached amount is
    ///   not exactly the price
    pub fn buy_item(
        &self,
        state: &mut LedgerState,
        ctx: &CallContext,
        id: ListingId,
    ) -> Result<SettlementEvent> {
        transact(state, |state| {
            state
                .assets
                .transfer(constants::NATIVE_ASSET, ctx.caller, self.account, ctx.attached)?;

            if !state.market.is_registered(ctx.caller) {
                return Err(SettleError::NotRegistered(ctx.caller));
            }
            let Some(listing) = state.market.listing_mut(id) else {
                return Err(SettleError::ItemUnavailable(id));
            };
            if !listing.available {
                return Err(SettleError::ItemUnavailable(id));
            }
            if listing.owner == ctx.caller {
                return Err(SettleError::SelfPurchase(id));
            }
            if ctx.attached != listing.price {
                return Err(SettleError::WrongPaymentAmount {
                    expected: listing.price,
                    attached: ctx.attached,
                });
            }

            // The sale flip: availability and ownership change in one
            // step.
            let seller = listing.owner;
            let price = listing.price;
            listing.available = false;
            listing.owner = ctx.caller;

            escrow::credit(&mut state.market, seller, price)?;

            tracing::debug!(
                listing = %id,
                seller = %seller,
                buyer = %ctx.caller,
                price = %price,
                "item sold"
            );
            let event = SettlementEvent::ItemSold {
                listing: id,
                seller,
                buyer: ctx.caller,
                price,
            };
            state.record(event.clone());
            Ok(event)
        })
    }

    /// Pay out the caller's entire pending pool from the market vault.
    ///
    /// The pool is drained to zero before the payout transfer runs, so
    /// untrusted transfer code observes nothing left to withdraw. A
    /// declined payout rolls the drain back.
    ///
    /// # Errors
    /// - [`SettleError::ReentrantCall`] if called from within a payout
    /// - [`SettleError::NotRegistered`] if the caller holds no
    ///   registration
    /// - [`SettleError::NothingToWithdraw`] if the pool is empty
    /// - [`SettleError::WithdrawalTransferFailed`] if the payout is
    ///   declined
    pub fn withdraw(
        &self,
        state: &mut LedgerState,
        transfers: &mut impl AssetTransfer,
        ctx: &CallContext,
    ) -> Result<SettlementEvent> {
        transact(state, |state| {
            state.market.lock.enter()?;

            // Drain before paying out. A re-entrant observer must see
            // an empty pool.
            let amount = escrow::drain(&mut state.market, ctx.caller)?;

            let leg = TransferLeg {
                asset: constants::NATIVE_ASSET,
                from: self.account,
                to: ctx.caller,
                amount,
            };
            transfers.transfer(state, &leg).map_err(|declined| {
                SettleError::WithdrawalTransferFailed {
                    reason: declined.to_string(),
                }
            })?;

            state.market.lock.exit();

            tracing::debug!(account = %ctx.caller, amount = %amount, "funds withdrawn");
            let event = SettlementEvent::FundsWithdrawn {
                account: ctx.caller,
                amount,
            };
            state.record(event.clone());
            Ok(event)
        })
    }

    /// Whether an account holds a registration.
    #[must_use]
    pub fn is_registered(&self, state: &LedgerState, account: Address) -> bool {
        state.market.is_registered(account)
    }

    /// An account's pending sale proceeds. Unregistered accounts read
    /// zero.
    #[must_use]
    pub fn pending_balance(&self, state: &LedgerState, account: Address) -> U256 {
        state
            .market
            .participant(account)
            .map_or(U256::ZERO, |p| p.pending)
    }

    /// Look up a listing by id.
    #[must_use]
    pub fn listing<'a>(&self, state: &'a LedgerState, id: ListingId) -> Option<&'a Listing> {
        state.market.listing(id)
    }
}
