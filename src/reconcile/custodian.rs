//! Custodian directory normalization
//!
//! Turns raw custodian records into a directory sorted by mask bit index,
//! so listings come out in a deterministic order regardless of how the
//! contract happened to order them.

use crate::reconcile::records::{parse_hex_u64, RawCustodian, RecordError};
use serde::{Deserialize, Serialize};

/// A normalized custodian: a co-signer with a bit position in the
/// confirmation mask
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Custodian {
    /// Custodian public key (hex)
    pub pubkey: String,
    /// 0-based bit position in the confirmation mask
    pub index: u32,
}

/// Normalize a raw custodian list: parse hex indexes and sort ascending
/// by index.
///
/// Output order is deterministic for a fixed input, independent of the
/// input's original order. Duplicate indexes are not deduplicated here;
/// the directory reflects whatever the contract reported.
///
/// # Errors
/// Fails if any index is not a valid hex integer or any public key is
/// empty; a non-hex index is never coerced to zero.
pub fn normalize_custodians(raw: &[RawCustodian]) -> Result<Vec<Custodian>, RecordError> {
    let mut custodians = Vec::with_capacity(raw.len());

    for record in raw {
        if record.pubkey.is_empty() {
            return Err(RecordError::MalformedCustodian {
                reason: format!("missing public key for index {:?}", record.index),
            });
        }
        let index = parse_hex_u64(&record.index)
            .ok()
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| RecordError::MalformedCustodian {
                reason: format!(
                    "custodian {}: invalid bit index {:?}",
                    record.pubkey, record.index
                ),
            })?;
        custodians.push(Custodian {
            pubkey: record.pubkey.clone(),
            index,
        });
    }

    // Stable sort keeps equal-index records in input order
    custodians.sort_by_key(|c| c.index);
    Ok(custodians)
}
