//! # opensettle-market
//!
//! **Escrowed marketplace** over the settlement ledger: participants
//! register unique display names, list items priced in the native coin,
//! and buy by attaching the exact price to the call.
//!
//! ## Escrow model
//!
//! 1. A buyer's payment lands in the market vault, never with the seller
//! 2. The sale credits the seller's pooled pending balance
//! 3. Withdrawal drains the whole pool to zero, then pays out
//! 4. A declined or re-entrant payout rolls everything back
//!
//! Proceeds from any number of sales pool into one balance; one
//! withdrawal empties it.

pub mod engine;
mod escrow;

pub use engine::MarketEngine;
