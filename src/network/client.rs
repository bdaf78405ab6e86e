//! Chain client boundary
//!
//! The agent only needs a handful of fullnode operations; everything above
//! this trait is chain-agnostic and can be driven by a fake in tests.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::{types::AccountAddress, wallet::LocalAccount};

/// Entry-function call as accepted by the fullnode JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}

impl EntryFunctionPayload {
    pub fn new(function: impl Into<String>, arguments: Vec<serde_json::Value>) -> Self {
        Self {
            payload_type: "entry_function_payload".to_string(),
            function: function.into(),
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountInfo {
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    pub authentication_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: serde_json::Value,
}

/// Subset of a committed or pending transaction the agent reads back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionInfo {
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub hash: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, with = "opt_u64_string")]
    pub gas_used: Option<u64>,
    /// Microseconds since the epoch.
    #[serde(default, with = "opt_u64_string")]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub vm_status: Option<String>,
}

impl TransactionInfo {
    pub fn is_pending(&self) -> bool {
        self.transaction_type == "pending_transaction"
    }
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Ask the testnet faucet to mint `amount_octas` into `address`.
    async fn fund_account(&self, address: &AccountAddress, amount_octas: u64) -> Result<()>;

    async fn get_account(&self, address: &AccountAddress) -> Result<AccountInfo>;

    async fn get_account_resource(&self, address: &str, resource_type: &str) -> Result<AccountResource>;

    async fn get_account_resources(&self, address: &AccountAddress) -> Result<Vec<AccountResource>>;

    /// Sign `payload` with `account` and submit it, returning the transaction hash.
    async fn submit_transaction(&self, account: &LocalAccount, payload: &EntryFunctionPayload) -> Result<String>;

    /// Resolve once the transaction is committed; errors if it failed on-chain.
    async fn wait_for_transaction(&self, hash: &str) -> Result<TransactionInfo>;

    async fn get_transaction_by_hash(&self, hash: &str) -> Result<TransactionInfo>;
}

/// The fullnode encodes u64 fields as JSON strings.
pub(crate) mod u64_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub(crate) mod opt_u64_string {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
