//! Error types for the OpenSettle settlement engine.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors
//! - 2xx: State conflict errors
//! - 3xx: Caller value errors
//! - 4xx: External transfer errors
//! - 5xx: Re-entrancy errors
//! - 6xx: Ledger errors

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::{ListingId, OrderDigest};

/// Central error enum for all OpenSettle operations.
///
/// Every failure aborts its entire operation with zero persisted side
/// effects; there is no partial-success state to report.
#[derive(Debug, Error)]
pub enum SettleError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The signature could not be parsed, could not be recovered, or the
    /// recovered signer does not match the order's initiator.
    #[error("OS_ERR_100: Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// The caller is not the party this operation is reserved for.
    #[error("OS_ERR_101: Unauthorized caller: required {required}, got {caller}")]
    UnauthorizedCaller { required: Address, caller: Address },

    /// The caller has not registered as a marketplace participant.
    #[error("OS_ERR_102: Account not registered: {0}")]
    NotRegistered(Address),

    // =================================================================
    // State Conflict Errors (2xx)
    // =================================================================
    /// The order was already executed or cancelled (exactly-once guard).
    #[error("OS_ERR_200: Order already settled: {0}")]
    AlreadySettled(OrderDigest),

    /// The order's expiry has passed.
    #[error("OS_ERR_201: Order expired: expiry {expiry} <= now {now}")]
    Expired { expiry: U256, now: u64 },

    /// The caller already holds a registration.
    #[error("OS_ERR_202: Account already registered: {0}")]
    AlreadyRegistered(Address),

    /// Another participant already claimed this display name.
    #[error("OS_ERR_203: Display name already taken: {name}")]
    NameTaken { name: String },

    /// The listing does not exist or was already sold.
    #[error("OS_ERR_204: Listing unavailable: {0}")]
    ItemUnavailable(ListingId),

    // =================================================================
    // Caller Value Errors (3xx)
    // =================================================================
    /// Listings must carry a nonzero price.
    #[error("OS_ERR_300: Listing price must be nonzero")]
    InvalidPrice,

    /// The attached payment does not equal the listing price.
    #[error("OS_ERR_301: Wrong payment amount: price {expected}, attached {attached}")]
    WrongPaymentAmount { expected: U256, attached: U256 },

    /// A seller attempted to buy their own listing.
    #[error("OS_ERR_302: Cannot buy own listing: {0}")]
    SelfPurchase(ListingId),

    /// Withdrawal requested with a zero pending balance.
    #[error("OS_ERR_303: Nothing to withdraw for account: {0}")]
    NothingToWithdraw(Address),

    // =================================================================
    // External Transfer Errors (4xx)
    // =================================================================
    /// The external transfer primitive declined a swap leg.
    #[error("OS_ERR_400: Transfer failed on leg {leg}: {reason}")]
    TransferFailed { leg: usize, reason: String },

    /// The external transfer primitive declined a withdrawal payout.
    #[error("OS_ERR_401: Withdrawal transfer failed: {reason}")]
    WithdrawalTransferFailed { reason: String },

    // =================================================================
    // Re-entrancy Errors (5xx)
    // =================================================================
    /// An operation re-entered an engine that was already mid-call.
    #[error("OS_ERR_500: Re-entrant call rejected")]
    ReentrantCall,

    // =================================================================
    // Ledger Errors (6xx)
    // =================================================================
    /// Not enough balance in the asset book to perform the movement.
    #[error("OS_ERR_600: Insufficient funds: asset {asset}, need {needed}, have {available}")]
    InsufficientFunds {
        asset: Address,
        needed: U256,
        available: U256,
    },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SettleError>;
