//! Client-local key/value state (connected wallet address)

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::{config::WALLET_ADDRESS_KEY, types::AccountAddress};

/// JSON object on disk, rewritten in full on every change.
#[derive(Debug, Clone)]
pub struct WalletStore {
    path: PathBuf,
}

impl WalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt state file {}", self.path.display()))
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)?;
        debug!(key, path = %self.path.display(), "Saved state entry");
        Ok(())
    }

    /// Returns whether the key was present.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.load()?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.persist(&entries)?;
        }
        Ok(existed)
    }

    pub fn saved_address(&self) -> Result<Option<AccountAddress>> {
        self.get(WALLET_ADDRESS_KEY)?
            .map(|raw| raw.parse().with_context(|| format!("Stored wallet address {} is invalid", raw)))
            .transpose()
    }

    pub fn save_address(&self, address: &AccountAddress) -> Result<()> {
        self.set(WALLET_ADDRESS_KEY, &address.to_hex())?;
        info!(address = %address.short(), "Saved wallet address");
        Ok(())
    }

    pub fn clear_address(&self) -> Result<bool> {
        self.remove(WALLET_ADDRESS_KEY)
    }
}
