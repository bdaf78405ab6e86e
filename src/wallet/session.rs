//! Single-slot wallet session
//!
//! At most one account is connected at a time. Connecting replaces the slot,
//! disconnecting clears it; the lock serializes overlapping calls.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use super::LocalAccount;
use crate::types::AccountAddress;

#[derive(Default)]
pub struct WalletSession {
    account: Arc<RwLock<Option<Arc<LocalAccount>>>>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `account`, returning the one it replaced.
    pub async fn connect(&self, account: LocalAccount) -> Option<Arc<LocalAccount>> {
        let address = account.address();
        let previous = self.account.write().await.replace(Arc::new(account));
        info!(address = %address.short(), replaced = previous.is_some(), "Wallet connected");
        previous
    }

    pub async fn disconnect(&self) -> Option<Arc<LocalAccount>> {
        let previous = self.account.write().await.take();
        if let Some(account) = &previous {
            info!(address = %account.address().short(), "Wallet disconnected");
        }
        previous
    }

    pub async fn current(&self) -> Option<Arc<LocalAccount>> {
        self.account.read().await.clone()
    }

    pub async fn address(&self) -> Option<AccountAddress> {
        self.account.read().await.as_ref().map(|a| a.address())
    }

    pub async fn is_connected(&self) -> bool {
        self.account.read().await.is_some()
    }
}
