//! # opensettle-swap
//!
//! **Bilateral swap settlement**: one party signs exchange terms off the
//! critical path; the counterparty later presents the signed order to
//! settle on-ledger.
//!
//! ## Settlement pipeline
//!
//! 1. Re-entry lock (reject nested calls from transfer code)
//! 2. Signature verification (EIP-712 recovery against the initiator)
//! 3. Expiry and caller checks
//! 4. Exactly-once flip to EXECUTED — before any external call
//! 5. Atomic two-leg transfer through the untrusted primitive
//!
//! Any failure rolls the whole call back; a swap either settles completely
//! or never happened.

pub mod engine;
pub mod executor;

pub use engine::SwapEngine;
pub use executor::{execute_legs, legs_for};
