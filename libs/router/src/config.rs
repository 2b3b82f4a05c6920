//! Injected deployment configuration.
//!
//! Deployed-contract addresses are plain data resolved once at startup and
//! passed to whoever needs them - no global address-book state. Unknown
//! chains load from JSON.

use ethers_core::types::Address;
use serde::{Deserialize, Serialize};

/// Per-chain addresses of the external contracts plans are built against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments {
    pub chain_id: u64,
    /// The on-chain command interpreter executing encoded plans
    pub interpreter: Address,
    /// The signature-based allowance contract permit steps target
    pub permit2: Address,
    /// Wrapped native token used by the wrap/unwrap commands
    pub wrapped_native: Address,
}

impl Deployments {
    /// Canonical Ethereum mainnet deployment
    pub fn mainnet() -> Self {
        Self {
            chain_id: 1,
            interpreter: addr("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD"),
            permit2: addr("000000000022D473030F116dDEE9F6B43aC78BA3"),
            wrapped_native: addr("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

fn addr(hex: &str) -> Address {
    // Only called on the hardcoded literals above
    hex.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_addresses_parse() {
        let deployments = Deployments::mainnet();
        assert_eq!(deployments.chain_id, 1);
        assert_ne!(deployments.interpreter, Address::zero());
        assert_ne!(deployments.permit2, Address::zero());
        assert_ne!(deployments.wrapped_native, Address::zero());
    }

    #[test]
    fn json_round_trip() {
        let deployments = Deployments::mainnet();
        let raw = serde_json::to_string(&deployments).unwrap();
        assert_eq!(Deployments::from_json(&raw).unwrap(), deployments);
    }
}
