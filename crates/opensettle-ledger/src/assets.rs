//! The host asset book.
//!
//! Balances are keyed by `(asset, account)`, both plain addresses; the
//! native settlement coin lives under the reserved asset address
//! [`NATIVE_ASSET`](opensettle_types::constants::NATIVE_ASSET). Deposits
//! mint balance into the book (host funding); transfers move it between
//! accounts and never create or destroy it. That conservation is what the
//! end-to-end supply checks pin down.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use opensettle_types::{Result, SettleError};

/// Per-(asset, account) balance store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBook {
    balances: HashMap<(Address, Address), U256>,
}

impl AssetBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint balance into an account. Host-level funding: this is the only
    /// way supply enters the book.
    pub fn deposit(&mut self, asset: Address, account: Address, amount: U256) {
        let entry = self.balances.entry((asset, account)).or_default();
        *entry += amount;
    }

    /// Current balance of an account in an asset. Absent entries read as
    /// zero.
    #[must_use]
    pub fn balance_of(&self, asset: Address, account: Address) -> U256 {
        self.balances
            .get(&(asset, account))
            .copied()
            .unwrap_or_default()
    }

    /// Move balance between accounts.
    ///
    /// # Errors
    /// Returns [`SettleError::InsufficientFunds`] if `from` does not hold
    /// `amount` of `asset`; the book is unchanged in that case.
    pub fn transfer(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(SettleError::InsufficientFunds {
                asset,
                needed: amount,
                available,
            });
        }

        // Self-transfers are a no-op but must not double-count.
        if from == to || amount.is_zero() {
            return Ok(());
        }

        *self
            .balances
            .entry((asset, from))
            .or_default() -= amount;
        *self.balances.entry((asset, to)).or_default() += amount;
        Ok(())
    }

    /// Total supply of an asset across all accounts.
    #[must_use]
    pub fn supply(&self, asset: Address) -> U256 {
        self.balances
            .iter()
            .filter(|((a, _), _)| *a == asset)
            .fold(U256::ZERO, |acc, (_, amount)| acc + amount)
    }
}
