//! Identifiers used throughout OpenSettle.
//!
//! `OrderDigest` is a content hash, not an assigned ID: it is derived from
//! the order's eight wire fields, so any two parties computing it over the
//! same order agree without coordination. `ListingId` is a plain monotonic
//! counter assigned by the marketplace.

use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OrderDigest
// ---------------------------------------------------------------------------

/// Deterministic fingerprint of a swap order (keccak-256 of the packed
/// wire encoding). This is the key under which the exactly-once state
/// machine records execution and cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderDigest(pub B256);

impl OrderDigest {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First four bytes as hex, for compact log lines.
    #[must_use]
    pub fn short(&self) -> String {
        format!("{:x}", self.0)[..8].to_string()
    }
}

impl fmt::Display for OrderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ListingId
// ---------------------------------------------------------------------------

/// Monotonically assigned marketplace listing identifier. The first
/// listing gets id 1; 0 is never valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ListingId(pub u64);

impl ListingId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listing:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
