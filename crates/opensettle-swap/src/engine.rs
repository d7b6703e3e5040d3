//! The swap settlement engine.
//!
//! `executeSwap` and `cancelSwap` as guard-clause pipelines over the
//! shared ledger state. Checks run in a fixed order and the first failure
//! aborts the whole call; the transaction wrapper guarantees that an
//! aborted call leaves no trace.
//!
//! ## Execution order
//!
//! ```text
//!   lock -> signature -> expiry -> caller -> flip EXECUTED -> legs -> unlock
//! ```
//!
//! The EXECUTED flip happens **before** the transfer legs run. Untrusted
//! transfer code that re-enters mid-legs therefore observes the order as
//! already settled, and a nested cancel bounces off `AlreadySettled`
//! rather than racing the execution.

use opensettle_ledger::{AssetTransfer, CallContext, LedgerState, transact};
use opensettle_types::{
    OrderDigest, Result, SettleError, SettlementEvent, SettlementStatus, SignedOrder,
    SigningDomain,
};

use crate::executor;

/// Settlement entry points for bilateral swaps.
///
/// The engine itself is a stateless config carrier; all mutable state
/// lives in the [`LedgerState`] passed to each call.
#[derive(Debug, Clone, Copy)]
pub struct SwapEngine {
    domain: SigningDomain,
}

impl SwapEngine {
    /// Create an engine accepting signatures for the given domain.
    #[must_use]
    pub fn new(domain: SigningDomain) -> Self {
        Self { domain }
    }

    /// The signing domain this engine verifies against.
    #[must_use]
    pub fn domain(&self) -> SigningDomain {
        self.domain
    }

    /// Settle a signed order: verify authorization, flip the order to
    /// EXECUTED, then run both transfer legs.
    ///
    /// Only the order's counterparty may trigger settlement, and only
    /// before expiry. Succeeds at most once per order digest.
    ///
    /// # Errors
    /// - [`SettleError::ReentrantCall`] if called from within a transfer
    /// - [`SettleError::InvalidSignature`] if the initiator's signature
    ///   does not verify
    /// - [`SettleError::Expired`] if `expiry <= ctx.now`
    /// - [`SettleError::UnauthorizedCaller`] if the caller is not the
    ///   counterparty
    /// - [`SettleError::AlreadySettled`] if the digest has a terminal
    ///   record
    /// - [`SettleError::TransferFailed`] if a leg is declined
    pub fn execute(
        &self,
        state: &mut LedgerState,
        transfers: &mut impl AssetTransfer,
        ctx: &CallContext,
        signed: &SignedOrder,
    ) -> Result<SettlementEvent> {
        transact(state, |state| {
            state.swaps.lock.enter()?;

            signed.verify(&self.domain)?;

            let order = &signed.order;
            if order.is_expired(ctx.now) {
                return Err(SettleError::Expired {
                    expiry: order.expiry,
                    now: ctx.now,
                });
            }
            if ctx.caller != order.counterparty {
                return Err(SettleError::UnauthorizedCaller {
                    required: order.counterparty,
                    caller: ctx.caller,
                });
            }

            // Flip before any external call. A re-entrant observer must
            // see this order as settled.
            let digest = signed.digest();
            state.swaps.mark_executed(digest)?;

            executor::execute_legs(state, transfers, order)?;

            state.swaps.lock.exit();

            tracing::debug!(
                digest = %digest,
                initiator = %order.initiator,
                counterparty = %order.counterparty,
                "swap executed"
            );
            let event = SettlementEvent::SwapExecuted {
                digest,
                initiator: order.initiator,
                counterparty: order.counterparty,
            };
            state.record(event.clone());
            Ok(event)
        })
    }

    /// Retire an unsettled order: verify authorization and flip the order
    /// to CANCELLED.
    ///
    /// Only the initiator may cancel, and only while the order is unseen.
    /// Expiry is not checked: an expired order can still be retired. No
    /// external code runs, so the call is not lock-guarded.
    ///
    /// # Errors
    /// - [`SettleError::InvalidSignature`] if the initiator's signature
    ///   does not verify
    /// - [`SettleError::UnauthorizedCaller`] if the caller is not the
    ///   initiator
    /// - [`SettleError::AlreadySettled`] if the digest has a terminal
    ///   record
    pub fn cancel(
        &self,
        state: &mut LedgerState,
        ctx: &CallContext,
        signed: &SignedOrder,
    ) -> Result<SettlementEvent> {
        transact(state, |state| {
            signed.verify(&self.domain)?;

            let order = &signed.order;
            if ctx.caller != order.initiator {
                return Err(SettleError::UnauthorizedCaller {
                    required: order.initiator,
                    caller: ctx.caller,
                });
            }

            let digest = signed.digest();
            state.swaps.mark_cancelled(digest)?;

            tracing::debug!(digest = %digest, initiator = %order.initiator, "swap cancelled");
            let event = SettlementEvent::SwapCancelled {
                digest,
                initiator: order.initiator,
            };
            state.record(event.clone());
            Ok(event)
        })
    }

    /// Current settlement status of an order digest.
    #[must_use]
    pub fn status(&self, state: &LedgerState, digest: OrderDigest) -> SettlementStatus {
        state.swaps.status(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;
    use opensettle_ledger::DirectTransfer;
    use opensettle_types::SwapOrder;

    fn domain() -> SigningDomain {
        SigningDomain::new(1, Address::repeat_byte(0x42))
    }

    /// Signer-backed order plus a state funded for both legs.
    fn setup() -> (SwapEngine, LedgerState, SignedOrder, PrivateKeySigner) {
        let signer = PrivateKeySigner::random();
        let counterparty = Address::repeat_byte(0x02);
        let order = SwapOrder::dummy(1, signer.address(), counterparty);

        let mut state = LedgerState::new();
        state.assets.deposit(order.assetA, order.initiator, order.amountA);
        state
            .assets
            .deposit(order.assetB, order.counterparty, order.amountB);

        let hash = order.signing_hash(&domain());
        let sig = signer.sign_hash_sync(&hash).unwrap();
        let signed = SignedOrder::from_signature(order, sig);

        (SwapEngine::new(domain()), state, signed, signer)
    }

    fn exec_ctx(signed: &SignedOrder) -> CallContext {
        CallContext::new(signed.order.counterparty, 1_700_000_000)
    }

    #[test]
    fn execute_happy_path() {
        let (engine, mut state, signed, _) = setup();
        let order = signed.order.clone();

        let event = engine
            .execute(&mut state, &mut DirectTransfer, &exec_ctx(&signed), &signed)
            .unwrap();

        assert!(matches!(event, SettlementEvent::SwapExecuted { digest, .. }
            if digest == signed.digest()));
        assert_eq!(
            engine.status(&state, signed.digest()),
            SettlementStatus::Executed
        );
        assert_eq!(
            state.assets.balance_of(order.assetA, order.counterparty),
            order.amountA
        );
        assert_eq!(
            state.assets.balance_of(order.assetB, order.initiator),
            order.amountB
        );
        assert!(!state.swaps.lock.is_held());
        assert_eq!(state.events().len(), 1);
    }

    #[test]
    fn replay_blocked() {
        let (engine, mut state, signed, _) = setup();
        let ctx = exec_ctx(&signed);

        engine
            .execute(&mut state, &mut DirectTransfer, &ctx, &signed)
            .unwrap();
        let err = engine
            .execute(&mut state, &mut DirectTransfer, &ctx, &signed)
            .unwrap_err();
        assert!(matches!(err, SettleError::AlreadySettled(_)));
    }

    #[test]
    fn wrong_caller_rejected() {
        let (engine, mut state, signed, _) = setup();
        let ctx = CallContext::new(Address::repeat_byte(0x99), 1_700_000_000);

        let err = engine
            .execute(&mut state, &mut DirectTransfer, &ctx, &signed)
            .unwrap_err();
        assert!(matches!(err, SettleError::UnauthorizedCaller { .. }));
        assert_eq!(
            engine.status(&state, signed.digest()),
            SettlementStatus::Unseen
        );
    }

    #[test]
    fn initiator_cannot_trigger_own_order() {
        let (engine, mut state, signed, _) = setup();
        let ctx = CallContext::new(signed.order.initiator, 1_700_000_000);

        let err = engine
            .execute(&mut state, &mut DirectTransfer, &ctx, &signed)
            .unwrap_err();
        assert!(matches!(err, SettleError::UnauthorizedCaller { .. }));
    }

    #[test]
    fn expired_order_rejected() {
        let (engine, mut state, mut signed, signer) = setup();
        signed.order.expiry = U256::from(1_000u64);
        let hash = signed.order.signing_hash(&domain());
        signed = SignedOrder::from_signature(
            signed.order.clone(),
            signer.sign_hash_sync(&hash).unwrap(),
        );

        let ctx = CallContext::new(signed.order.counterparty, 1_000);
        let err = engine
            .execute(&mut state, &mut DirectTransfer, &ctx, &signed)
            .unwrap_err();
        assert!(
            matches!(err, SettleError::Expired { .. }),
            "expiry == now must already be expired"
        );
    }

    #[test]
    fn tampered_order_rejected() {
        let (engine, mut state, mut signed, _) = setup();
        signed.order.amountB = U256::from(1u64);

        let err = engine
            .execute(&mut state, &mut DirectTransfer, &exec_ctx(&signed), &signed)
            .unwrap_err();
        assert!(matches!(err, SettleError::InvalidSignature { .. }));
    }

    #[test]
    fn cancel_happy_path() {
        let (engine, mut state, signed, _) = setup();
        let ctx = CallContext::new(signed.order.initiator, 1_700_000_000);

        let event = engine.cancel(&mut state, &ctx, &signed).unwrap();
        assert!(matches!(event, SettlementEvent::SwapCancelled { .. }));
        assert_eq!(
            engine.status(&state, signed.digest()),
            SettlementStatus::Cancelled
        );
    }

    #[test]
    fn cancel_by_counterparty_rejected() {
        let (engine, mut state, signed, _) = setup();
        let ctx = CallContext::new(signed.order.counterparty, 1_700_000_000);

        let err = engine.cancel(&mut state, &ctx, &signed).unwrap_err();
        assert!(matches!(err, SettleError::UnauthorizedCaller { .. }));
    }

    #[test]
    fn cancel_after_expiry_allowed() {
        let (engine, mut state, mut signed, signer) = setup();
        signed.order.expiry = U256::from(1_000u64);
        let hash = signed.order.signing_hash(&domain());
        signed = SignedOrder::from_signature(
            signed.order.clone(),
            signer.sign_hash_sync(&hash).unwrap(),
        );

        let ctx = CallContext::new(signed.order.initiator, 2_000);
        engine.cancel(&mut state, &ctx, &signed).unwrap();
        assert_eq!(
            engine.status(&state, signed.digest()),
            SettlementStatus::Cancelled
        );
    }

    #[test]
    fn execute_after_cancel_blocked() {
        let (engine, mut state, signed, _) = setup();
        let cancel_ctx = CallContext::new(signed.order.initiator, 1_700_000_000);
        engine.cancel(&mut state, &cancel_ctx, &signed).unwrap();

        let err = engine
            .execute(&mut state, &mut DirectTransfer, &exec_ctx(&signed), &signed)
            .unwrap_err();
        assert!(matches!(err, SettleError::AlreadySettled(_)));
    }

    #[test]
    fn cancel_after_execute_blocked() {
        let (engine, mut state, signed, _) = setup();
        engine
            .execute(&mut state, &mut DirectTransfer, &exec_ctx(&signed), &signed)
            .unwrap();

        let cancel_ctx = CallContext::new(signed.order.initiator, 1_700_000_000);
        let err = engine.cancel(&mut state, &cancel_ctx, &signed).unwrap_err();
        assert!(matches!(err, SettleError::AlreadySettled(_)));
    }

    #[test]
    fn failed_execute_leaves_no_trace() {
        let (engine, mut state, signed, _) = setup();
        let order = signed.order.clone();

        // Drain the counterparty so leg 1 must fail after leg 0 moved.
        let drained = state.assets.balance_of(order.assetB, order.counterparty);
        state
            .assets
            .transfer(order.assetB, order.counterparty, Address::repeat_byte(0x77), drained)
            .unwrap();
        let before = state.clone();

        let err = engine
            .execute(&mut state, &mut DirectTransfer, &exec_ctx(&signed), &signed)
            .unwrap_err();
        assert!(matches!(err, SettleError::TransferFailed { leg: 1, .. }));

        assert_eq!(
            state.assets.balance_of(order.assetA, order.initiator),
            before.assets.balance_of(order.assetA, order.initiator),
            "leg 0 must be rolled back"
        );
        assert_eq!(
            engine.status(&state, signed.digest()),
            SettlementStatus::Unseen,
            "the EXECUTED flip must be rolled back"
        );
        assert!(!state.swaps.lock.is_held());
        assert!(state.events().is_empty());
    }

    #[test]
    fn order_executable_after_rolled_back_attempt() {
        let (engine, mut state, signed, _) = setup();
        let order = signed.order.clone();

        // First attempt fails on an unfunded counterparty leg.
        let drained = state.assets.balance_of(order.assetB, order.counterparty);
        state
            .assets
            .transfer(order.assetB, order.counterparty, Address::repeat_byte(0x77), drained)
            .unwrap();
        assert!(
            engine
                .execute(&mut state, &mut DirectTransfer, &exec_ctx(&signed), &signed)
                .is_err()
        );

        // Refund and retry: the rollback left the digest unseen.
        state
            .assets
            .transfer(order.assetB, Address::repeat_byte(0x77), order.counterparty, drained)
            .unwrap();
        engine
            .execute(&mut state, &mut DirectTransfer, &exec_ctx(&signed), &signed)
            .unwrap();
        assert_eq!(
            engine.status(&state, signed.digest()),
            SettlementStatus::Executed
        );
    }
}
