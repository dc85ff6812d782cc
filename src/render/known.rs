//! Known-custodian registry
//!
//! An optional JSON file mapping custodian public keys to a profile URL,
//! so listings can show who a key belongs to.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Registry loading errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Public keys the operator recognizes, with a link for each
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KnownCustodians(HashMap<String, String>);

impl KnownCustodians {
    /// Load the registry from a JSON file of `{"pubkey": "url"}` entries
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path)?;
        Ok(Self(serde_json::from_str(&json)?))
    }

    /// Link for a public key, if it is known
    pub fn lookup(&self, pubkey: &str) -> Option<&str> {
        self.0.get(pubkey).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
