//! Marketplace listing records.
//!
//! A listing is created by `list_item` and never deleted. At the moment of
//! sale `available` flips to `false` and `owner` is reassigned to the
//! buyer, in the same step. Sold listings stay on record.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::ListingId;

/// A marketplace listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    /// Monotonically assigned identifier (first listing gets 1).
    pub id: ListingId,
    /// Seller-chosen item name. Not unique.
    pub name: String,
    /// Free-form item description.
    pub description: String,
    /// Sale price in the native settlement coin. Always nonzero.
    pub price: U256,
    /// `true` until sold, then `false` forever.
    pub available: bool,
    /// The current owner: the seller until sold, then the buyer.
    pub owner: Address,
}

impl Listing {
    /// Create a fresh, available listing.
    #[must_use]
    pub fn new(
        id: ListingId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: U256,
        owner: Address,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            available: true,
            owner,
        }
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.available { "available" } else { "sold" };
        write!(f, "{} \"{}\" @ {} [{state}]", self.id, self.name, self.price)
    }
}
