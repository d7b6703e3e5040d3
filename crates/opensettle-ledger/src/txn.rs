//! Atomic transaction boundary.
//!
//! The host environment promises that every externally triggered operation
//! either commits completely or leaves no trace. A plain Rust process has
//! no native rollback, so the boundary is built explicitly: checkpoint the
//! state, run the operation, and restore the checkpoint on failure.
//!
//! Nested invocations compose the way host call frames do. An inner
//! `transact` that fails restores only the inner effects; if the outer
//! operation then fails too, the outer restore discards everything,
//! including effects the inner call had committed.

use opensettle_types::Result;

use crate::state::LedgerState;

/// Run `op` atomically against `state`.
///
/// On `Ok` the mutations stand. On `Err` the state is restored to the
/// pre-call checkpoint, byte for byte, and the error is passed through.
pub fn transact<T>(
    state: &mut LedgerState,
    op: impl FnOnce(&mut LedgerState) -> Result<T>,
) -> Result<T> {
    let checkpoint = state.clone();
    match op(state) {
        Ok(value) => Ok(value),
        Err(err) => {
            *state = checkpoint;
            Err(err)
        }
    }
}
