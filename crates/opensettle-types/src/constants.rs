//! System-wide constants for the OpenSettle settlement engine.

use alloy_primitives::Address;

/// EIP-712 domain name. Part of the signing domain separator: a signature
/// produced for any other protocol name is invalid here.
pub const PROTOCOL_NAME: &str = "OpenSettle";

/// EIP-712 domain version. Bumping it invalidates all outstanding
/// signatures, which is the upgrade escape hatch.
pub const PROTOCOL_VERSION: &str = "1";

/// Reserved asset address for the native settlement coin. Marketplace
/// payments and withdrawals move this asset.
pub const NATIVE_ASSET: Address = Address::ZERO;

/// The id assigned to the first marketplace listing. Id 0 is never valid.
pub const FIRST_LISTING_ID: u64 = 1;

/// ECDSA signature length in bytes: r[32] + s[32] + v[1].
pub const SIGNATURE_LEN: usize = 65;

/// Packed wire encoding length of a swap order:
/// 32 (id) + 20 * 4 (addresses) + 32 * 3 (amounts, expiry).
pub const PACKED_ORDER_LEN: usize = 208;

/// Number of transfer legs in a swap settlement.
pub const SWAP_LEGS: usize = 2;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenSettle";
