//! Escrow bookkeeping for sale proceeds.
//!
//! Proceeds are never paid out at the moment of sale. They accumulate in
//! the seller's pooled `pending` balance and leave only through
//! withdrawal, which drains the pool to zero **before** the payout
//! transfer runs. A single pool per participant: two sales at 250 and
//! one withdrawal of 500, not two withdrawals of 250.

use alloy_primitives::{Address, U256};
use opensettle_ledger::MarketRecords;
use opensettle_types::{Result, SettleError};

/// Credit sale proceeds to a seller's pending pool.
///
/// # Errors
/// Returns [`SettleError::NotRegistered`] if the seller holds no
/// registration. Sellers register before listing, so a credit to an
/// unregistered account indicates a corrupted listing record.
pub fn credit(market: &mut MarketRecords, seller: Address, amount: U256) -> Result<()> {
    let participant = market
        .participant_mut(seller)
        .ok_or(SettleError::NotRegistered(seller))?;
    participant.pending += amount;
    Ok(())
}

/// Drain a participant's entire pending pool, returning the drained
/// amount.
///
/// The pool reads zero from the moment this returns; the caller runs
/// the payout transfer against the returned amount afterwards.
///
/// # Errors
/// - [`SettleError::NotRegistered`] if the account holds no registration
/// - [`SettleError::NothingToWithdraw`] if the pool is empty
pub fn drain(market: &mut MarketRecords, account: Address) -> Result<U256> {
    let participant = market
        .participant_mut(account)
        .ok_or(SettleError::NotRegistered(account))?;
    if !participant.has_pending() {
        return Err(SettleError::NothingToWithdraw(account));
    }
    let amount = participant.pending;
    participant.pending = U256::ZERO;
    Ok(amount)
}
