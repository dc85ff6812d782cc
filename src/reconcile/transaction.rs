//! Pending transaction snapshots
//!
//! A transaction is an immutable snapshot of on-chain state at query time.
//! Confirming one does not mutate anything here; observing the new state
//! requires a fresh query.

use crate::reconcile::records::{parse_hex_u64, parse_mask, RawTransaction, RecordError};
use serde::{Deserialize, Serialize};

/// A pending multisig transaction awaiting signatures
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Opaque transaction identifier
    pub id: String,
    /// Destination address
    pub dest: String,
    /// Transfer value in the smallest currency unit
    pub value: u64,
    /// Bitmask of custodians that have signed (bit i = custodian at index i)
    pub confirmations_mask: u64,
    /// Signatures collected so far
    pub signs_received: u32,
    /// Signatures required to execute
    pub signs_required: u32,
}

impl Transaction {
    /// Decode a raw contract record into a transaction snapshot
    ///
    /// # Errors
    /// Fails if any numeric field does not parse; fields are never
    /// silently coerced.
    pub fn from_raw(raw: &RawTransaction) -> Result<Self, RecordError> {
        let malformed = |reason: String| RecordError::MalformedTransaction {
            id: raw.id.clone(),
            reason,
        };
        let count = |field: &str| {
            parse_hex_u64(field).and_then(|v| {
                u32::try_from(v).map_err(|_| format!("signature count out of range {:?}", field))
            })
        };

        Ok(Self {
            id: raw.id.clone(),
            dest: raw.dest.clone(),
            value: parse_hex_u64(&raw.value).map_err(&malformed)?,
            confirmations_mask: parse_mask(&raw.confirmations_mask).map_err(&malformed)?,
            signs_received: count(&raw.signs_received).map_err(&malformed)?,
            signs_required: count(&raw.signs_required).map_err(&malformed)?,
        })
    }

    /// Human-readable signature progress, e.g. "6/7"
    ///
    /// Derived from the contract's own counters, which are authoritative;
    /// never recomputed from the signature matrix.
    pub fn progress(&self) -> String {
        format!("{}/{}", self.signs_received, self.signs_required)
    }
}

/// Decode a list of raw transaction records, failing on the first
/// malformed one
pub fn parse_transactions(raw: &[RawTransaction]) -> Result<Vec<Transaction>, RecordError> {
    raw.iter().map(Transaction::from_raw).collect()
}
