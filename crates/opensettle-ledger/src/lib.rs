//! # opensettle-ledger
//!
//! The **host ledger model**: everything the settlement engines assume
//! their execution environment provides.
//!
//! ## What the host guarantees
//!
//! - **Serialized execution**: one state-mutating call at a time, rendered
//!   here as `&mut LedgerState` (exclusive access is compiler-enforced).
//! - **Atomic transactions**: [`transact`] checkpoints the state and
//!   restores it on failure — an operation commits completely or leaves
//!   no trace. Nested calls compose like host call frames.
//! - **Call facts**: [`CallContext`] carries the caller identity, the
//!   block-scoped timestamp, and any attached native coin.
//! - **Asset balances**: [`AssetBook`] keyed by `(asset, account)`.
//!
//! ## What the host does NOT guarantee
//!
//! The asset-transfer primitive ([`AssetTransfer`]) is third-party code:
//! it may decline, and it may re-enter the engines through the state it is
//! handed. [`ReentryLock`] is the engines' defense.

pub mod assets;
pub mod context;
pub mod reentry;
pub mod state;
pub mod transfer;
pub mod txn;

pub use assets::AssetBook;
pub use context::CallContext;
pub use reentry::ReentryLock;
pub use state::{LedgerState, MarketRecords, SwapRecords};
pub use transfer::{AssetTransfer, DirectTransfer, TransferDeclined, TransferLeg};
pub use txn::transact;
