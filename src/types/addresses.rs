//! Aptos account addresses and the tracked protocol registry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 32-byte Aptos account address, displayed as `0x` followed by 64 hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    pub const LENGTH: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Abbreviated form for logs, e.g. `0x48ab...61af`.
    pub fn short(&self) -> String {
        let full = self.to_hex();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = anyhow::Error;

    /// Accepts long and short forms (`0x1`), with or without the `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("0x");
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            anyhow::bail!("invalid account address length: {}", s);
        }

        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| anyhow::anyhow!("invalid account address {}: {}", s, e))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountAddress> for String {
    fn from(address: AccountAddress) -> Self {
        address.to_hex()
    }
}

/// A protocol the agent samples on every refresh.
#[derive(Debug, Clone, Copy)]
pub struct TrackedProtocol {
    pub name: &'static str,
    pub contract_address: &'static str,
    pub pool_resource: &'static str,
    pub category: &'static str,
}

impl TrackedProtocol {
    /// Move resource type holding the pool state.
    pub fn pool_info_type(&self) -> String {
        format!("{}::{}::PoolInfo", self.contract_address, self.pool_resource)
    }
}

pub const TRACKED_PROTOCOLS: &[TrackedProtocol] = &[
    TrackedProtocol {
        name: "Thala Finance",
        contract_address: "0x48271d39d0b05bd6efca2278f22277d6fcc375504f9839fd73f74ace240861af",
        pool_resource: "stable_pool",
        category: "Lending",
    },
    TrackedProtocol {
        name: "LiquidSwap",
        contract_address: "0x190d44266241744264b964a37b8f09863167a12d3e70cda39376cfb4e3561e12",
        pool_resource: "liquidity_pool",
        category: "DEX",
    },
    TrackedProtocol {
        name: "Joule",
        contract_address: "0x5a97986a9d031c4567e15b797be516910cfcb4156312482efc6a19c0a30c948",
        pool_resource: "farming_pool",
        category: "Yield Farming",
    },
    TrackedProtocol {
        name: "Echelon",
        contract_address: "0x2f9e4a9aa12c4cc5e9b5b6d1e8a9b8c7d6e5f4a3b2c1d0e9f8a7b6c5d4e3f2a1",
        pool_resource: "yield_pool",
        category: "Derivatives",
    },
];

pub fn tracked_protocol(name: &str) -> Option<&'static TrackedProtocol> {
    TRACKED_PROTOCOLS.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_addresses_are_left_padded() {
        let address: AccountAddress = "0x1".parse().unwrap();
        assert_eq!(address.as_bytes()[31], 1);
        assert_eq!(address.to_hex().len(), 66);
        assert!(address.to_hex().starts_with("0x0000"));
    }

    #[test]
    fn tracked_contract_addresses_parse() {
        for protocol in TRACKED_PROTOCOLS {
            let address: AccountAddress = protocol.contract_address.parse().unwrap();
            assert_eq!(
                address.to_hex().trim_start_matches("0x").trim_start_matches('0'),
                protocol.contract_address.trim_start_matches("0x").trim_start_matches('0')
            );
        }
    }

    #[test]
    fn rejects_non_hex_and_oversized_input() {
        assert!("0xzz".parse::<AccountAddress>().is_err());
        assert!("".parse::<AccountAddress>().is_err());
        assert!(format!("0x{}", "a".repeat(65)).parse::<AccountAddress>().is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let address: AccountAddress = "0xabc".parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address.to_hex()));
        let back: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
