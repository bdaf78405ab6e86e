//! Local Aptos account: ed25519 key, address derivation and signing

use anyhow::{Context, Result};
use ed25519_dalek::{Signer, SigningKey};
use sha3::{Digest, Sha3_256};
use std::fmt;
use crate::types::AccountAddress;

/// Authentication key scheme byte for single-signer ed25519 accounts.
const ED25519_SCHEME: u8 = 0x00;

pub struct LocalAccount {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl LocalAccount {
    /// Fresh random demo account.
    pub fn generate() -> Self {
        let secret: [u8; 32] = rand::random();
        Self::from_secret(secret)
    }

    /// Account from a hex-encoded 32-byte private key, `0x` prefix optional.
    pub fn from_private_key_hex(private_key: &str) -> Result<Self> {
        let digits = private_key.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits).context("Private key is not valid hex")?;
        let secret: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| anyhow::anyhow!("Private key must be 32 bytes, got {}", b.len()))?;
        Ok(Self::from_secret(secret))
    }

    fn from_secret(secret: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&secret);
        let address = derive_address(&signing_key.verifying_key().to_bytes());
        Self { signing_key, address }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing_key.verifying_key().to_bytes()))
    }

    /// Sign raw bytes, returning the `0x`-prefixed hex signature.
    pub fn sign_hex(&self, message: &[u8]) -> String {
        format!("0x{}", hex::encode(self.signing_key.sign(message).to_bytes()))
    }
}

impl fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// sha3-256(public key || scheme byte).
pub fn derive_address(public_key: &[u8; 32]) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key);
    hasher.update([ED25519_SCHEME]);
    AccountAddress::new(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    const KEY: &str = "0x9bf49a6a0755f953811fce125f2683d50429c3bb49e074147e0089a52eae155f";

    #[test]
    fn same_key_same_address() {
        let a = LocalAccount::from_private_key_hex(KEY).unwrap();
        let b = LocalAccount::from_private_key_hex(KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.public_key_hex().len(), 66);
    }

    #[test]
    fn generated_accounts_differ() {
        assert_ne!(LocalAccount::generate().address(), LocalAccount::generate().address());
    }

    #[test]
    fn rejects_bad_keys() {
        assert!(LocalAccount::from_private_key_hex("0xnothex").is_err());
        assert!(LocalAccount::from_private_key_hex("0xabcd").is_err());
    }

    #[test]
    fn signatures_verify_against_public_key() {
        let account = LocalAccount::from_private_key_hex(KEY).unwrap();
        let message = b"rebalance";
        let signature_hex = account.sign_hex(message);

        let public: [u8; 32] = hex::decode(account.public_key_hex().trim_start_matches("0x"))
            .unwrap()
            .try_into()
            .unwrap();
        let signature: [u8; 64] = hex::decode(signature_hex.trim_start_matches("0x"))
            .unwrap()
            .try_into()
            .unwrap();

        let verifying_key = VerifyingKey::from_bytes(&public).unwrap();
        assert!(verifying_key.verify(message, &Signature::from_bytes(&signature)).is_ok());
        assert_eq!(derive_address(&public), account.address());
    }

    #[test]
    fn debug_output_hides_key_material() {
        let account = LocalAccount::from_private_key_hex(KEY).unwrap();
        let rendered = format!("{:?}", account);
        assert!(!rendered.contains(KEY.trim_start_matches("0x")));
    }
}
