//! Configuration types for OpenSettle deployments.

use alloy_primitives::Address;
use alloy_sol_types::{Eip712Domain, eip712_domain};
use serde::{Deserialize, Serialize};

use crate::constants;

/// The signing domain a deployment accepts signatures for.
///
/// All four separator fields (protocol name, version, chain id, verifying
/// contract) are folded into the signing hash. A signature produced for a
/// different chain or a different deployment of the same protocol is
/// invalid here, which is the cross-context replay defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningDomain {
    /// The ledger (chain) this deployment settles on.
    pub chain_id: u64,
    /// The deployment's own identity on that ledger.
    pub verifying_contract: Address,
}

impl SigningDomain {
    #[must_use]
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            chain_id,
            verifying_contract,
        }
    }

    /// Build the EIP-712 domain for order signing.
    #[must_use]
    pub fn eip712(&self) -> Eip712Domain {
        eip712_domain! {
            name: constants::PROTOCOL_NAME,
            version: constants::PROTOCOL_VERSION,
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn domain_carries_all_separator_fields() {
        let domain = SigningDomain::new(1, Address::repeat_byte(0x42)).eip712();
        assert_eq!(domain.name.as_deref(), Some(constants::PROTOCOL_NAME));
        assert_eq!(domain.version.as_deref(), Some(constants::PROTOCOL_VERSION));
        assert_eq!(domain.chain_id, Some(U256::from(1u64)));
        assert_eq!(
            domain.verifying_contract,
            Some(Address::repeat_byte(0x42))
        );
    }

    #[test]
    fn different_chains_produce_different_separators() {
        let contract = Address::repeat_byte(0x42);
        let a = SigningDomain::new(1, contract).eip712();
        let b = SigningDomain::new(5, contract).eip712();
        assert_ne!(a.separator(), b.separator());
    }

    #[test]
    fn different_contracts_produce_different_separators() {
        let a = SigningDomain::new(1, Address::repeat_byte(0x01)).eip712();
        let b = SigningDomain::new(1, Address::repeat_byte(0x02)).eip712();
        assert_ne!(a.separator(), b.separator());
    }

    #[test]
    fn serde_roundtrip() {
        let domain = SigningDomain::new(100, Address::repeat_byte(0x07));
        let json = serde_json::to_string(&domain).unwrap();
        let back: SigningDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(domain, back);
    }
}
