//! Swap order types and authorization.
//!
//! A swap order is a signed commitment to exchange `amountA` of `assetA`
//! (paid by the initiator) for `amountB` of `assetB` (paid by the
//! counterparty). Orders are negotiated and signed off the critical path;
//! the counterparty later presents the signed order to trigger settlement.
//!
//! # EIP-712 Signing
//!
//! Orders use EIP-712 typed data signing with the domain from
//! [`SigningDomain`](crate::SigningDomain):
//! - Name: "OpenSettle"
//! - Version: "1"
//! - ChainId + verifying contract: per deployment
//!
//! The order type is:
//! ```text
//! SwapOrder(uint256 id,address initiator,address counterparty,
//!           address assetA,address assetB,uint256 amountA,
//!           uint256 amountB,uint256 expiry)
//! ```
//!
//! Two distinct hashes exist on purpose. The EIP-712 signing hash is what
//! the initiator signs; it binds the deployment domain. The [`digest`]
//! fingerprint keys the exactly-once state machine; it covers the same
//! eight fields but no domain, so the same terms always map to the same
//! settlement record. Both change if any field changes.
//!
//! [`digest`]: SwapOrder::digest

use alloy_primitives::{Address, B256, Bytes, Signature, U256, keccak256};
use alloy_sol_types::{SolStruct, sol};
use serde::{Deserialize, Serialize};

use crate::{OrderDigest, Result, SettleError, SigningDomain, constants};

sol! {
    /// The eight wire fields of a swap order, in signing order.
    ///
    /// Field order and types are the wire contract: fingerprinting and
    /// signing cover the fields in exactly this order.
    #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    struct SwapOrder {
        uint256 id;
        address initiator;
        address counterparty;
        address assetA;
        address assetB;
        uint256 amountA;
        uint256 amountB;
        uint256 expiry;
    }
}

impl SwapOrder {
    /// Tightly packed wire encoding: every field at a fixed offset, no
    /// length prefixes. 32 + 20 + 20 + 20 + 20 + 32 + 32 + 32 bytes.
    #[must_use]
    pub fn packed(&self) -> [u8; constants::PACKED_ORDER_LEN] {
        let mut buf = [0u8; constants::PACKED_ORDER_LEN];
        buf[0..32].copy_from_slice(&self.id.to_be_bytes::<32>());
        buf[32..52].copy_from_slice(self.initiator.as_slice());
        buf[52..72].copy_from_slice(self.counterparty.as_slice());
        buf[72..92].copy_from_slice(self.assetA.as_slice());
        buf[92..112].copy_from_slice(self.assetB.as_slice());
        buf[112..144].copy_from_slice(&self.amountA.to_be_bytes::<32>());
        buf[144..176].copy_from_slice(&self.amountB.to_be_bytes::<32>());
        buf[176..208].copy_from_slice(&self.expiry.to_be_bytes::<32>());
        buf
    }

    /// Deterministic fingerprint: keccak-256 of the packed encoding.
    ///
    /// This is the exactly-once state key. Any change to any field
    /// produces a different digest.
    #[must_use]
    pub fn digest(&self) -> OrderDigest {
        OrderDigest(keccak256(self.packed()))
    }

    /// Compute the EIP-712 signing hash for this order under a deployment
    /// domain. This is what the initiator signs.
    #[must_use]
    pub fn signing_hash(&self, domain: &SigningDomain) -> B256 {
        self.eip712_signing_hash(&domain.eip712())
    }

    /// Returns `true` if the order can no longer be executed.
    /// An order expires the moment `now` reaches `expiry`.
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        self.expiry <= U256::from(now)
    }
}

/// Dummy order for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl SwapOrder {
    /// Create a dummy order for unit tests: 100 of asset `0xaa..` against
    /// 200 of asset `0xbb..`, expiring far in the future.
    pub fn dummy(id: u64, initiator: Address, counterparty: Address) -> Self {
        Self {
            id: U256::from(id),
            initiator,
            counterparty,
            assetA: Address::repeat_byte(0xaa),
            assetB: Address::repeat_byte(0xbb),
            amountA: U256::from(100u64),
            amountB: U256::from(200u64),
            expiry: U256::from(4_000_000_000u64),
        }
    }
}

/// A signed order ready for transmission or settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
    /// The unsigned order terms.
    #[serde(flatten)]
    pub order: SwapOrder,
    /// ECDSA signature (65 bytes: r[32] + s[32] + v[1]).
    pub signature: Bytes,
}

impl SignedOrder {
    /// Create a signed order from raw signature bytes.
    pub fn new(order: SwapOrder, signature: Bytes) -> Self {
        Self { order, signature }
    }

    /// Create a signed order from a parsed signature.
    pub fn from_signature(order: SwapOrder, sig: Signature) -> Self {
        Self {
            order,
            signature: Bytes::copy_from_slice(&sig.as_bytes()),
        }
    }

    /// The order's fingerprint (independent of the signature).
    #[must_use]
    pub fn digest(&self) -> OrderDigest {
        self.order.digest()
    }

    /// Parse the signature bytes.
    fn parse_signature(&self) -> Result<Signature> {
        if self.signature.len() != constants::SIGNATURE_LEN {
            return Err(SettleError::InvalidSignature {
                reason: format!(
                    "invalid signature length: expected {}, got {}",
                    constants::SIGNATURE_LEN,
                    self.signature.len()
                ),
            });
        }

        Signature::try_from(self.signature.as_ref()).map_err(|e| SettleError::InvalidSignature {
            reason: format!("malformed signature: {e}"),
        })
    }

    /// Recover the signer address from the signature.
    pub fn recover_signer(&self, domain: &SigningDomain) -> Result<Address> {
        let sig = self.parse_signature()?;
        let hash = self.order.signing_hash(domain);

        sig.recover_address_from_prehash(&hash)
            .map_err(|e| SettleError::InvalidSignature {
                reason: format!("recovery failed: {e}"),
            })
    }

    /// Verify that this order was signed by its named initiator.
    ///
    /// Returns the recovered signer on success.
    pub fn verify(&self, domain: &SigningDomain) -> Result<Address> {
        let signer = self.recover_signer(domain)?;
        if signer != self.order.initiator {
            return Err(SettleError::InvalidSignature {
                reason: format!(
                    "signer {signer} is not the order initiator {}",
                    self.order.initiator
                ),
            });
        }
        Ok(signer)
    }
}
