//! Raw wire records returned by the wallet contract
//!
//! The contract reports every numeric field as a string: custodian indexes,
//! transaction values and signature counters are hex-encoded, while the
//! confirmation mask arrives as a decimal string (or hex with a `0x` prefix).
//! Parsing is strict: a field that does not decode fails loudly instead of
//! being coerced to zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding raw contract records
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Malformed custodian: {reason}")]
    MalformedCustodian { reason: String },
    #[error("Malformed transaction {id}: {reason}")]
    MalformedTransaction { id: String, reason: String },
}

/// A custodian record as returned by the contract, before normalization
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawCustodian {
    /// Custodian public key (hex)
    pub pubkey: String,
    /// Bit position in the confirmation mask, hex-encoded
    pub index: String,
}

/// A pending transaction record as returned by the contract
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawTransaction {
    /// Opaque transaction identifier
    pub id: String,
    /// Destination address
    pub dest: String,
    /// Transfer value in the smallest currency unit, hex-encoded
    pub value: String,
    /// Confirmation bitmask, decimal unless prefixed with `0x`
    #[serde(rename = "confirmationsMask")]
    pub confirmations_mask: String,
    /// Signatures collected so far, hex-encoded
    #[serde(rename = "signsReceived")]
    pub signs_received: String,
    /// Signatures required to execute, hex-encoded
    #[serde(rename = "signsRequired")]
    pub signs_required: String,
}

/// Parse a hex-encoded unsigned integer, with or without a `0x` prefix
pub fn parse_hex_u64(field: &str) -> Result<u64, String> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    if digits.is_empty() {
        return Err(format!("empty hex field {:?}", field));
    }
    u64::from_str_radix(digits, 16).map_err(|_| format!("invalid hex integer {:?}", field))
}

/// Parse the confirmation mask: decimal by default, hex when `0x`-prefixed
pub fn parse_mask(field: &str) -> Result<u64, String> {
    if field.starts_with("0x") || field.starts_with("0X") {
        parse_hex_u64(field)
    } else if field.is_empty() {
        Err("empty mask field".to_string())
    } else {
        field
            .parse::<u64>()
            .map_err(|_| format!("invalid mask {:?}", field))
    }
}
