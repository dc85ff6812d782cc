//! Wallet contract client interface
//!
//! The console never talks to a blockchain node directly; everything it
//! needs from the chain goes through [`MultisigClient`]. Key derivation,
//! ABI encoding and transport are the implementation's concern, not the
//! caller's. [`LocalWalletHost`] is the built-in implementation backing
//! the demo mode and the test suite.

pub mod local;

use crate::reconcile::{RawCustodian, RawTransaction};
use crate::session::KeyPair;
use thiserror::Error;

pub use local::LocalWalletHost;

/// Errors raised by wallet contract operations
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Wallet not found: {0}")]
    AccountNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Not a custodian of this wallet: {0}")]
    UnauthorizedSigner(String),
    #[error("Transaction {txid} already confirmed by {pubkey}")]
    AlreadyConfirmed { txid: String, pubkey: String },
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("Duplicate custodian public key")]
    DuplicateCustodian,
    #[error("Wallet needs at least one custodian")]
    NoCustodians,
    #[error("Too many custodians: {0} exceeds the confirmation mask width")]
    TooManyCustodians(usize),
    #[error("Wallet already exists: {0}")]
    AccountExists(String),
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Read and write access to a multisig wallet contract
///
/// Readers return the contract's raw wire records; decoding them is the
/// reconciliation core's job. The two reads are independent queries and
/// are not guaranteed to observe the same block height.
pub trait MultisigClient {
    /// Derive a signing key pair from a seed phrase
    fn derive_sign_keys(&self, phrase: &str) -> Result<KeyPair, ClientError>;

    /// Custodians of the wallet at `address`, as raw records
    fn get_custodians(&self, address: &str) -> Result<Vec<RawCustodian>, ClientError>;

    /// Pending transactions of the wallet at `address`, as raw records
    fn get_transactions(&self, address: &str) -> Result<Vec<RawTransaction>, ClientError>;

    /// Submit a transfer of `value` (smallest unit) to `dest`, signed with
    /// `keys`; returns the new transaction id
    fn submit_transaction(
        &mut self,
        address: &str,
        dest: &str,
        value: u64,
        keys: &KeyPair,
    ) -> Result<String, ClientError>;

    /// Confirm a pending transaction, signed with `keys`
    fn confirm_transaction(
        &mut self,
        address: &str,
        txid: &str,
        keys: &KeyPair,
    ) -> Result<(), ClientError>;
}
