//! In-memory multisig wallet host
//!
//! Emulates the on-chain multisig contract for the demo mode and tests:
//! wallets hold custodians with mask bit indexes and a signature threshold,
//! and pending transactions accumulate confirmations until the threshold
//! executes them. State persists as JSON under the data directory, in the
//! raw wire encodings the real contract would use.

use crate::client::{ClientError, MultisigClient};
use crate::reconcile::{RawCustodian, RawTransaction};
use crate::session::KeyPair;
use chrono::{DateTime, Utc};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Confirmation masks are 64-bit, so a wallet cannot hold more custodians
const MAX_CUSTODIANS: usize = 64;

/// A custodian slot: public key plus its mask bit index
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CustodianSlot {
    pubkey: String,
    index: u32,
}

/// A pending transaction held by the host
#[derive(Clone, Debug, Serialize, Deserialize)]
struct PendingTx {
    id: String,
    dest: String,
    value: u64,
    confirmations_mask: u64,
    signs_received: u32,
    created_at: DateTime<Utc>,
}

/// A hosted multisig wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Account {
    custodians: Vec<CustodianSlot>,
    signs_required: u32,
    pending: Vec<PendingTx>,
}

impl Account {
    fn custodian_index(&self, pubkey: &str) -> Option<u32> {
        self.custodians
            .iter()
            .find(|slot| slot.pubkey == pubkey)
            .map(|slot| slot.index)
    }
}

/// Persisted host state
#[derive(Debug, Default, Serialize, Deserialize)]
struct HostState {
    accounts: HashMap<String, Account>,
}

/// Local stand-in for the on-chain multisig contract
pub struct LocalWalletHost {
    state: HostState,
    path: PathBuf,
}

impl LocalWalletHost {
    /// Load host state from the data directory, or start empty
    pub fn open(data_dir: &Path) -> Result<Self, ClientError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join("wallet-host.json");

        let state = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            HostState::default()
        };

        Ok(Self { state, path })
    }

    fn save(&self) -> Result<(), ClientError> {
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Create a hosted wallet with the given custodian public keys.
    /// Bit indexes are assigned by position in `custodians`.
    pub fn create_account(
        &mut self,
        address: &str,
        custodians: &[String],
        signs_required: u32,
    ) -> Result<(), ClientError> {
        if self.state.accounts.contains_key(address) {
            return Err(ClientError::AccountExists(address.to_string()));
        }
        if custodians.is_empty() {
            return Err(ClientError::NoCustodians);
        }
        if custodians.len() > MAX_CUSTODIANS {
            return Err(ClientError::TooManyCustodians(custodians.len()));
        }
        if signs_required == 0 {
            return Err(ClientError::InvalidThreshold(
                "threshold must be at least 1".to_string(),
            ));
        }
        if signs_required as usize > custodians.len() {
            return Err(ClientError::InvalidThreshold(format!(
                "threshold {} exceeds custodian count {}",
                signs_required,
                custodians.len()
            )));
        }

        let mut sorted = custodians.to_vec();
        sorted.sort();
        if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(ClientError::DuplicateCustodian);
        }

        let slots = custodians
            .iter()
            .enumerate()
            .map(|(i, pubkey)| CustodianSlot {
                pubkey: pubkey.clone(),
                index: i as u32,
            })
            .collect();

        self.state.accounts.insert(
            address.to_string(),
            Account {
                custodians: slots,
                signs_required,
                pending: Vec::new(),
            },
        );
        self.save()?;

        log::info!(
            "created wallet {} ({}-of-{})",
            address,
            signs_required,
            custodians.len()
        );
        Ok(())
    }

    fn account(&self, address: &str) -> Result<&Account, ClientError> {
        self.state
            .accounts
            .get(address)
            .ok_or_else(|| ClientError::AccountNotFound(address.to_string()))
    }

    fn account_mut(&mut self, address: &str) -> Result<&mut Account, ClientError> {
        self.state
            .accounts
            .get_mut(address)
            .ok_or_else(|| ClientError::AccountNotFound(address.to_string()))
    }

    /// Transaction ids look like the contract's: 8 hash bytes, hex, 0x-prefixed
    fn transaction_id(address: &str, dest: &str, value: u64, now: DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(address.as_bytes());
        hasher.update(dest.as_bytes());
        hasher.update(value.to_be_bytes());
        hasher.update(now.timestamp_nanos_opt().unwrap_or(0).to_be_bytes());
        format!("0x{}", hex::encode(&hasher.finalize()[..8]))
    }
}

impl MultisigClient for LocalWalletHost {
    /// Deterministic derivation: the secret scalar is the SHA-256 of the
    /// phrase, the public key follows from it on secp256k1. A stand-in for
    /// the real client library's mnemonic derivation.
    fn derive_sign_keys(&self, phrase: &str) -> Result<KeyPair, ClientError> {
        let digest = Sha256::digest(phrase.trim().as_bytes());
        let secret = SecretKey::from_slice(digest.as_slice())
            .map_err(|e| ClientError::KeyDerivation(e.to_string()))?;
        let public = PublicKey::from_secret_key(&Secp256k1::new(), &secret);

        Ok(KeyPair {
            public: hex::encode(public.serialize()),
            secret: hex::encode(secret.secret_bytes()),
        })
    }

    fn get_custodians(&self, address: &str) -> Result<Vec<RawCustodian>, ClientError> {
        let account = self.account(address)?;
        Ok(account
            .custodians
            .iter()
            .map(|slot| RawCustodian {
                pubkey: slot.pubkey.clone(),
                index: format!("0x{:x}", slot.index),
            })
            .collect())
    }

    fn get_transactions(&self, address: &str) -> Result<Vec<RawTransaction>, ClientError> {
        let account = self.account(address)?;
        Ok(account
            .pending
            .iter()
            .map(|tx| RawTransaction {
                id: tx.id.clone(),
                dest: tx.dest.clone(),
                value: format!("0x{:x}", tx.value),
                confirmations_mask: tx.confirmations_mask.to_string(),
                signs_received: format!("0x{:x}", tx.signs_received),
                signs_required: format!("0x{:x}", account.signs_required),
            })
            .collect())
    }

    fn submit_transaction(
        &mut self,
        address: &str,
        dest: &str,
        value: u64,
        keys: &KeyPair,
    ) -> Result<String, ClientError> {
        let account = self.account_mut(address)?;
        let index = account
            .custodian_index(&keys.public)
            .ok_or_else(|| ClientError::UnauthorizedSigner(keys.public.clone()))?;

        let now = Utc::now();
        let id = Self::transaction_id(address, dest, value, now);

        // The submitter's own confirmation counts
        if account.signs_required <= 1 {
            log::info!("transaction {} executed on submit", id);
        } else {
            account.pending.push(PendingTx {
                id: id.clone(),
                dest: dest.to_string(),
                value,
                confirmations_mask: 1u64 << index,
                signs_received: 1,
                created_at: now,
            });
        }
        self.save()?;

        Ok(id)
    }

    fn confirm_transaction(
        &mut self,
        address: &str,
        txid: &str,
        keys: &KeyPair,
    ) -> Result<(), ClientError> {
        let account = self.account_mut(address)?;
        let index = account
            .custodian_index(&keys.public)
            .ok_or_else(|| ClientError::UnauthorizedSigner(keys.public.clone()))?;

        let required = account.signs_required;
        let position = account
            .pending
            .iter()
            .position(|tx| tx.id == txid)
            .ok_or_else(|| ClientError::TransactionNotFound(txid.to_string()))?;

        let tx = &mut account.pending[position];
        if tx.confirmations_mask & (1u64 << index) != 0 {
            return Err(ClientError::AlreadyConfirmed {
                txid: txid.to_string(),
                pubkey: keys.public.clone(),
            });
        }

        tx.confirmations_mask |= 1u64 << index;
        tx.signs_received += 1;

        if tx.signs_received >= required {
            log::info!("transaction {} reached quorum, executing", txid);
            account.pending.remove(position);
        }
        self.save()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{build_matrix, normalize_custodians, parse_transactions};

    const ADDRESS: &str = "0:8e972280ad5c693387ea18c88017006e1858c1bc99173e83926e8fae5392fbb7";

    fn host_with_account(required: u32) -> (LocalWalletHost, Vec<KeyPair>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut host = LocalWalletHost::open(dir.path()).unwrap();

        let keys: Vec<KeyPair> = ["alpha", "bravo", "charlie"]
            .iter()
            .map(|phrase| host.derive_sign_keys(phrase).unwrap())
            .collect();
        let pubkeys: Vec<String> = keys.iter().map(|k| k.public.clone()).collect();

        host.create_account(ADDRESS, &pubkeys, required).unwrap();
        (host, keys, dir)
    }

    #[test]
    fn test_key_derivation_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalWalletHost::open(dir.path()).unwrap();

        let a = host.derive_sign_keys("winter apple brave cost").unwrap();
        let b = host.derive_sign_keys("winter apple brave cost").unwrap();
        let c = host.derive_sign_keys("other phrase").unwrap();

        assert_eq!(a, b);
        assert_ne!(a.public, c.public);
        // compressed secp256k1 public key
        assert_eq!(hex::decode(&a.public).unwrap().len(), 33);
    }

    #[test]
    fn test_account_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = LocalWalletHost::open(dir.path()).unwrap();
        let pubkeys = vec!["pk1".to_string(), "pk2".to_string()];

        assert!(matches!(
            host.create_account(ADDRESS, &[], 1),
            Err(ClientError::NoCustodians)
        ));
        assert!(matches!(
            host.create_account(ADDRESS, &pubkeys, 0),
            Err(ClientError::InvalidThreshold(_))
        ));
        assert!(matches!(
            host.create_account(ADDRESS, &pubkeys, 3),
            Err(ClientError::InvalidThreshold(_))
        ));
        assert!(matches!(
            host.create_account(ADDRESS, &["pk1".to_string(), "pk1".to_string()], 1),
            Err(ClientError::DuplicateCustodian)
        ));

        host.create_account(ADDRESS, &pubkeys, 2).unwrap();
        assert!(matches!(
            host.create_account(ADDRESS, &pubkeys, 2),
            Err(ClientError::AccountExists(_))
        ));
    }

    #[test]
    fn test_custodians_carry_positional_indexes() {
        let (host, keys, _dir) = host_with_account(2);
        let raw = host.get_custodians(ADDRESS).unwrap();

        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0].index, "0x0");
        assert_eq!(raw[2].index, "0x2");
        assert_eq!(raw[1].pubkey, keys[1].public);
    }

    #[test]
    fn test_submit_sets_submitter_bit() {
        let (mut host, keys, _dir) = host_with_account(2);

        let txid = host
            .submit_transaction(ADDRESS, "0:abcd", 5_000_000_000, &keys[1])
            .unwrap();
        assert!(txid.starts_with("0x"));

        let raw = host.get_transactions(ADDRESS).unwrap();
        assert_eq!(raw.len(), 1);
        // custodian 1 submitted, so bit 1 is set and one signature counted
        assert_eq!(raw[0].confirmations_mask, "2");
        assert_eq!(raw[0].signs_received, "0x1");
        assert_eq!(raw[0].signs_required, "0x2");
        assert_eq!(raw[0].value, "0x12a05f200");
    }

    #[test]
    fn test_submit_requires_custodian_key() {
        let (mut host, _keys, _dir) = host_with_account(2);
        let outsider = host.derive_sign_keys("outsider").unwrap();

        let result = host.submit_transaction(ADDRESS, "0:abcd", 1, &outsider);
        assert!(matches!(result, Err(ClientError::UnauthorizedSigner(_))));
    }

    #[test]
    fn test_confirm_reaches_quorum_and_executes() {
        let (mut host, keys, _dir) = host_with_account(2);

        let txid = host
            .submit_transaction(ADDRESS, "0:abcd", 1_000_000_000, &keys[0])
            .unwrap();
        host.confirm_transaction(ADDRESS, &txid, &keys[2]).unwrap();

        // quorum reached, transaction executed and gone from pending
        assert!(host.get_transactions(ADDRESS).unwrap().is_empty());
    }

    #[test]
    fn test_double_confirm_rejected() {
        let (mut host, keys, _dir) = host_with_account(3);

        let txid = host
            .submit_transaction(ADDRESS, "0:abcd", 1, &keys[0])
            .unwrap();
        let result = host.confirm_transaction(ADDRESS, &txid, &keys[0]);
        assert!(matches!(result, Err(ClientError::AlreadyConfirmed { .. })));
    }

    #[test]
    fn test_confirm_unknown_transaction() {
        let (mut host, keys, _dir) = host_with_account(2);
        let result = host.confirm_transaction(ADDRESS, "0xdead", &keys[0]);
        assert!(matches!(result, Err(ClientError::TransactionNotFound(_))));
    }

    #[test]
    fn test_single_custodian_wallet_executes_on_submit() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = LocalWalletHost::open(dir.path()).unwrap();
        let keys = host.derive_sign_keys("solo").unwrap();
        host.create_account(ADDRESS, &[keys.public.clone()], 1)
            .unwrap();

        host.submit_transaction(ADDRESS, "0:abcd", 1, &keys).unwrap();
        assert!(host.get_transactions(ADDRESS).unwrap().is_empty());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let txid;
        {
            let mut host = LocalWalletHost::open(dir.path()).unwrap();
            let keys = host.derive_sign_keys("alpha").unwrap();
            let other = host.derive_sign_keys("bravo").unwrap();
            host.create_account(ADDRESS, &[keys.public.clone(), other.public], 2)
                .unwrap();
            txid = host
                .submit_transaction(ADDRESS, "0:abcd", 7, &keys)
                .unwrap();
        }

        let host = LocalWalletHost::open(dir.path()).unwrap();
        let raw = host.get_transactions(ADDRESS).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].id, txid);
        assert_eq!(host.get_custodians(ADDRESS).unwrap().len(), 2);
    }

    #[test]
    fn test_wire_records_flow_through_reconciliation() {
        let (mut host, keys, _dir) = host_with_account(3);

        let txid = host
            .submit_transaction(ADDRESS, "0:abcd", 54_280_000_000_000, &keys[0])
            .unwrap();
        host.confirm_transaction(ADDRESS, &txid, &keys[2]).unwrap();

        let custodians = normalize_custodians(&host.get_custodians(ADDRESS).unwrap()).unwrap();
        let transactions = parse_transactions(&host.get_transactions(ADDRESS).unwrap()).unwrap();
        let matrix = build_matrix(&transactions, &custodians);

        assert!(matrix.is_signed(&txid, &keys[0].public));
        assert!(!matrix.is_signed(&txid, &keys[1].public));
        assert!(matrix.is_signed(&txid, &keys[2].public));
        assert_eq!(matrix.progress(&txid), Some("2/3"));
        assert_eq!(matrix.signed_count(&txid), 2);
    }
}
