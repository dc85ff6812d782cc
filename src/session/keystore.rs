//! File-backed session key storage
//!
//! Holds the logged-in key pair with an explicit init (login) / teardown
//! (logout) lifecycle. The store is passed by reference to whatever needs
//! signing material; nothing reaches for it ambiently.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Session storage errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// A signing key pair, both halves hex-encoded
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyPair {
    pub public: String,
    pub secret: String,
}

/// File-backed store for the current session's key pair
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Open a key store under the given data directory
    ///
    /// Creates the directory if needed; the session file itself is only
    /// written on `set`.
    pub fn open(data_dir: &Path) -> Result<Self, SessionError> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// The currently stored key pair, if logged in
    pub fn get(&self) -> Result<Option<KeyPair>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Store a key pair, replacing any existing session
    pub fn set(&self, keys: &KeyPair) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(keys)?;
        fs::write(&self.path, json)?;
        log::info!("session stored for public key {}", keys.public);
        Ok(())
    }

    /// Clear the session; clearing an empty store is not an error
    pub fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            log::info!("session cleared");
        }
        Ok(())
    }
}
