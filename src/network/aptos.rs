//! Aptos fullnode and faucet REST client

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use super::{
    client::{u64_string, AccountInfo, AccountResource, ChainClient, EntryFunctionPayload, TransactionInfo},
    polling::{poll_until, PollConfig},
};
use crate::{
    config::{Config, TRANSACTION_EXPIRATION_SECS},
    types::AccountAddress,
    wallet::LocalAccount,
};

const HTTP_TIMEOUT_SECS: u64 = 10;

pub struct AptosRestClient {
    http: reqwest::Client,
    node_url: String,
    faucet_url: String,
    gas_unit_price: u64,
    max_gas_amount: u64,
    confirmation: PollConfig,
}

#[derive(Debug, Clone, Serialize)]
struct UnsignedTransaction {
    sender: String,
    #[serde(with = "u64_string")]
    sequence_number: u64,
    #[serde(with = "u64_string")]
    max_gas_amount: u64,
    #[serde(with = "u64_string")]
    gas_unit_price: u64,
    #[serde(with = "u64_string")]
    expiration_timestamp_secs: u64,
    payload: EntryFunctionPayload,
}

#[derive(Debug, Serialize)]
struct TransactionSignature {
    #[serde(rename = "type")]
    signature_type: &'static str,
    public_key: String,
    signature: String,
}

#[derive(Debug, Serialize)]
struct SignedTransaction {
    #[serde(flatten)]
    transaction: UnsignedTransaction,
    signature: TransactionSignature,
}

#[derive(Debug, Deserialize)]
struct PendingTransaction {
    hash: String,
}

impl AptosRestClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut client = Self::with_urls(&config.node_url, &config.faucet_url)?;
        client.gas_unit_price = config.gas_unit_price;
        client.max_gas_amount = config.max_gas_amount;
        client.confirmation.timeout = Duration::from_secs(config.execution_timeout_secs);
        Ok(client)
    }

    pub fn with_urls(node_url: &str, faucet_url: &str) -> Result<Self> {
        let defaults = Config::default();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            node_url: node_url.trim_end_matches('/').to_string(),
            faucet_url: faucet_url.trim_end_matches('/').to_string(),
            gas_unit_price: defaults.gas_unit_price,
            max_gas_amount: defaults.max_gas_amount,
            confirmation: PollConfig {
                timeout: Duration::from_secs(defaults.execution_timeout_secs),
                ..Default::default()
            },
        })
    }

    pub fn with_confirmation(mut self, confirmation: PollConfig) -> Self {
        self.confirmation = confirmation;
        self
    }

    fn node(&self, path: &str) -> String {
        format!("{}{}", self.node_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response, context: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("⚠️ {} returned error status {}: {}", context, status, body);
            anyhow::bail!("{} failed: {} - {}", context, status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", context))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Result<T> {
        let response = self.http
            .get(url)
            .send()
            .await
            .with_context(|| format!("{} request failed", context))?;
        Self::read_json(response, context).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, url: &str, body: &B, context: &str) -> Result<T> {
        let response = self.http
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("{} request failed", context))?;
        Self::read_json(response, context).await
    }

    /// `None` while the node does not know the hash yet.
    async fn fetch_transaction(&self, hash: &str) -> Result<Option<TransactionInfo>> {
        let response = self.http
            .get(self.node(&format!("/transactions/by_hash/{}", hash)))
            .send()
            .await
            .context("Transaction lookup request failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_json(response, "Transaction lookup").await.map(Some)
    }
}

#[async_trait]
impl ChainClient for AptosRestClient {
    async fn fund_account(&self, address: &AccountAddress, amount_octas: u64) -> Result<()> {
        let response = self.http
            .post(format!("{}/mint", self.faucet_url))
            .query(&[("address", address.to_hex()), ("amount", amount_octas.to_string())])
            .send()
            .await
            .context("Faucet request failed")?;

        let _hashes: Vec<String> = Self::read_json(response, "Faucet mint").await?;
        info!("💧 Funded {} with {} octas", address.short(), amount_octas);
        Ok(())
    }

    async fn get_account(&self, address: &AccountAddress) -> Result<AccountInfo> {
        self.get_json(&self.node(&format!("/accounts/{}", address)), "Account lookup").await
    }

    async fn get_account_resource(&self, address: &str, resource_type: &str) -> Result<AccountResource> {
        self.get_json(
            &self.node(&format!("/accounts/{}/resource/{}", address, resource_type)),
            "Resource lookup",
        ).await
    }

    async fn get_account_resources(&self, address: &AccountAddress) -> Result<Vec<AccountResource>> {
        self.get_json(&self.node(&format!("/accounts/{}/resources", address)), "Resources lookup").await
    }

    async fn submit_transaction(&self, account: &LocalAccount, payload: &EntryFunctionPayload) -> Result<String> {
        let sender = account.address();
        let info = self.get_account(&sender).await
            .context("Failed to read sequence number")?;

        let expiration = chrono::Utc::now().timestamp().max(0) as u64 + TRANSACTION_EXPIRATION_SECS;
        let transaction = UnsignedTransaction {
            sender: sender.to_hex(),
            sequence_number: info.sequence_number,
            max_gas_amount: self.max_gas_amount,
            gas_unit_price: self.gas_unit_price,
            expiration_timestamp_secs: expiration,
            payload: payload.clone(),
        };

        let signing_message: String = self.post_json(
            &self.node("/transactions/encode_submission"),
            &transaction,
            "Transaction encoding",
        ).await?;
        let message = hex::decode(signing_message.trim_start_matches("0x"))
            .context("Signing message is not valid hex")?;

        let signed = SignedTransaction {
            transaction,
            signature: TransactionSignature {
                signature_type: "ed25519_signature",
                public_key: account.public_key_hex(),
                signature: account.sign_hex(&message),
            },
        };

        let pending: PendingTransaction = self.post_json(
            &self.node("/transactions"),
            &signed,
            "Transaction submission",
        ).await?;

        debug!(hash = %pending.hash, sequence_number = info.sequence_number, "Transaction submitted");
        Ok(pending.hash)
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<TransactionInfo> {
        let committed = poll_until(
            || async {
                Ok::<_, anyhow::Error>(self.fetch_transaction(hash).await?.filter(|tx| !tx.is_pending()))
            },
            &self.confirmation,
            &format!("transaction {}", hash),
        ).await?;

        if committed.success != Some(true) {
            anyhow::bail!(
                "Transaction {} failed: {}",
                hash,
                committed.vm_status.as_deref().unwrap_or("unknown vm status")
            );
        }
        Ok(committed)
    }

    async fn get_transaction_by_hash(&self, hash: &str) -> Result<TransactionInfo> {
        self.fetch_transaction(hash)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", hash))
    }
}
