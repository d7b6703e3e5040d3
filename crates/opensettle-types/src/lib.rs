//! # opensettle-types
//!
//! Shared types, errors, and configuration for the **OpenSettle**
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderDigest`], [`ListingId`]
//! - **Order model**: [`SwapOrder`], [`SignedOrder`], [`SettlementStatus`]
//! - **Marketplace model**: [`Participant`], [`Listing`]
//! - **Audit model**: [`SettlementEvent`]
//! - **Configuration**: [`SigningDomain`]
//! - **Errors**: [`SettleError`] with `OS_ERR_` prefix codes
//! - **Constants**: protocol identity, wire sizes, reserved addresses

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod listing;
pub mod order;
pub mod participant;
pub mod status;

// Re-export all primary types at crate root for ergonomic imports:
//   use opensettle_types::{SwapOrder, SignedOrder, SettleError, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use listing::*;
pub use order::*;
pub use participant::*;
pub use status::*;

// Constants are accessed via `opensettle_types::constants::FOO`
// (not re-exported to avoid name collisions).
