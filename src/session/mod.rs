//! Session key management

pub mod keystore;

pub use keystore::{KeyPair, KeyStore, SessionError};
