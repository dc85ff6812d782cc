//! Signature-status reconciliation
//!
//! Joins a transaction list and a custodian directory into a
//! per-transaction, per-custodian signed/unsigned matrix by decoding each
//! transaction's confirmation mask. The matrix exists only for the duration
//! of one rendering pass and is rebuilt from scratch each time.

use crate::reconcile::custodian::Custodian;
use crate::reconcile::mask::has_signed;
use crate::reconcile::transaction::Transaction;
use std::collections::HashMap;

/// Per-transaction, per-custodian signature status
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureMatrix {
    /// txid -> (custodian pubkey -> signed)
    signers: HashMap<String, HashMap<String, bool>>,
    /// txid -> "received/required" progress string
    progress: HashMap<String, String>,
}

impl SignatureMatrix {
    /// Whether the given custodian has signed the given transaction.
    /// Unknown transaction or custodian reads as unsigned.
    pub fn is_signed(&self, txid: &str, pubkey: &str) -> bool {
        self.signers
            .get(txid)
            .and_then(|row| row.get(pubkey))
            .copied()
            .unwrap_or(false)
    }

    /// Signature progress for a transaction, e.g. "6/7"
    pub fn progress(&self, txid: &str) -> Option<&str> {
        self.progress.get(txid).map(String::as_str)
    }

    /// Number of custodians recorded as signed for a transaction
    pub fn signed_count(&self, txid: &str) -> usize {
        self.signers
            .get(txid)
            .map(|row| row.values().filter(|signed| **signed).count())
            .unwrap_or(0)
    }

    /// Number of transactions in the matrix
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the matrix holds no transactions
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

/// Build the signature matrix for a set of transactions against a
/// custodian directory.
///
/// Pure transform: allocates a fresh matrix each call and mutates nothing.
/// An empty custodian directory yields an empty per-custodian mapping for
/// every transaction. If two custodians share a bit index (the contract
/// does not guarantee uniqueness) the later one's key silently wins.
///
/// The decoded signer count is expected to match each transaction's
/// `signs_received` counter; a mismatch is logged, since it signals either
/// a decoding bug or custodian and transaction lists fetched at different
/// block heights.
pub fn build_matrix(transactions: &[Transaction], custodians: &[Custodian]) -> SignatureMatrix {
    let mut matrix = SignatureMatrix::default();

    for tx in transactions {
        let mut row = HashMap::with_capacity(custodians.len());
        for custodian in custodians {
            row.insert(
                custodian.pubkey.clone(),
                has_signed(tx.confirmations_mask, custodian.index),
            );
        }

        if !custodians.is_empty() {
            let decoded = row.values().filter(|signed| **signed).count();
            if decoded != tx.signs_received as usize {
                log::warn!(
                    "transaction {}: mask decodes to {} signatures but contract reports {}",
                    tx.id,
                    decoded,
                    tx.signs_received
                );
            }
        }

        matrix.progress.insert(tx.id.clone(), tx.progress());
        matrix.signers.insert(tx.id.clone(), row);
    }

    matrix
}
