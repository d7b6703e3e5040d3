//! Two-leg transfer execution.
//!
//! A swap settles as exactly two transfer legs in a fixed order:
//!
//! ```text
//!   leg 0: assetA, initiator    -> counterparty, amountA
//!   leg 1: assetB, counterparty -> initiator,    amountB
//! ```
//!
//! The first declined leg aborts the whole operation; the enclosing
//! transaction then rolls back the earlier leg and the settlement flip,
//! so a half-transferred swap cannot exist.

use opensettle_ledger::{AssetTransfer, LedgerState, TransferLeg};
use opensettle_types::{Result, SettleError, SwapOrder, constants};

/// Build the swap's transfer legs in execution order.
#[must_use]
pub fn legs_for(order: &SwapOrder) -> [TransferLeg; constants::SWAP_LEGS] {
    [
        TransferLeg {
            asset: order.assetA,
            from: order.initiator,
            to: order.counterparty,
            amount: order.amountA,
        },
        TransferLeg {
            asset: order.assetB,
            from: order.counterparty,
            to: order.initiator,
            amount: order.amountB,
        },
    ]
}

/// Run both legs through the transfer primitive.
///
/// # Errors
/// Maps the first declined leg to [`SettleError::TransferFailed`] with the
/// zero-based leg index.
pub fn execute_legs(
    state: &mut LedgerState,
    transfers: &mut impl AssetTransfer,
    order: &SwapOrder,
) -> Result<()> {
    for (leg_index, leg) in legs_for(order).iter().enumerate() {
        transfers
            .transfer(state, leg)
            .map_err(|declined| SettleError::TransferFailed {
                leg: leg_index,
                reason: declined.reason,
            })?;
    }
    Ok(())
}
