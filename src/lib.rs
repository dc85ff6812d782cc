//! msig-console: a command-line console for multi-signature wallets
//!
//! This crate provides:
//! - Signature-status reconciliation: joining a wallet's custodian list and
//!   pending transactions into a per-custodian signed/unsigned matrix by
//!   decoding the contract's confirmation bitmask
//! - A file-backed session key store with an explicit login/logout lifecycle
//! - A wallet client trait, with an in-memory local host for demo and tests
//! - Text rendering of transaction listings with signature progress
//!
//! # Example
//!
//! ```rust
//! use msig_console::reconcile::{
//!     build_matrix, normalize_custodians, parse_transactions, RawCustodian, RawTransaction,
//! };
//!
//! let custodians = normalize_custodians(&[
//!     RawCustodian { pubkey: "alice".into(), index: "0x1".into() },
//!     RawCustodian { pubkey: "bob".into(), index: "0x0".into() },
//! ]).unwrap();
//!
//! let transactions = parse_transactions(&[RawTransaction {
//!     id: "0x5fd8c8fbd3089f81".into(),
//!     dest: "0:8e97".into(),
//!     value: "0x3b9aca00".into(),
//!     confirmations_mask: "2".into(),
//!     signs_received: "0x1".into(),
//!     signs_required: "0x2".into(),
//! }]).unwrap();
//!
//! let matrix = build_matrix(&transactions, &custodians);
//! assert!(matrix.is_signed("0x5fd8c8fbd3089f81", "alice"));
//! assert!(!matrix.is_signed("0x5fd8c8fbd3089f81", "bob"));
//! assert_eq!(matrix.progress("0x5fd8c8fbd3089f81"), Some("1/2"));
//! ```

pub mod cli;
pub mod client;
pub mod reconcile;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use client::{ClientError, LocalWalletHost, MultisigClient};
pub use reconcile::{
    build_matrix, has_signed, normalize_custodians, parse_transactions, Custodian, RawCustodian,
    RawTransaction, RecordError, SignatureMatrix, Transaction,
};
pub use render::KnownCustodians;
pub use session::{KeyPair, KeyStore, SessionError};
