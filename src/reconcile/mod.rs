//! Signature-status reconciliation
//!
//! This module provides:
//! - Raw record decoding (strict hex/decimal parsing, no silent coercion)
//! - Custodian directory normalization (sorted by mask bit index)
//! - Confirmation mask decoding
//! - The per-transaction, per-custodian signature matrix
//!
//! Everything here is synchronous and pure: no I/O, no shared state, fresh
//! outputs on every call.

pub mod custodian;
pub mod mask;
pub mod matrix;
pub mod records;
pub mod transaction;

pub use custodian::{normalize_custodians, Custodian};
pub use mask::has_signed;
pub use matrix::{build_matrix, SignatureMatrix};
pub use records::{RawCustodian, RawTransaction, RecordError};
pub use transaction::{parse_transactions, Transaction};
