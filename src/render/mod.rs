//! Text rendering for wallet listings
//!
//! Takes the already-computed signature matrix and transaction snapshots
//! and produces display lines. Pure string production; nothing in here
//! touches the reconciliation core's internals or performs I/O.

pub mod known;

use crate::reconcile::{Custodian, SignatureMatrix, Transaction};

pub use known::{KnownCustodians, RegistryError};

/// Smallest currency units per whole token
const UNITS_PER_TOKEN: u64 = 1_000_000_000;

/// Format a value in the smallest unit as whole tokens, trimming
/// trailing zeros: 54_280_000_000_000 -> "54280", 1_500_000_000 -> "1.5"
pub fn format_amount(value: u64) -> String {
    let whole = value / UNITS_PER_TOKEN;
    let frac = value % UNITS_PER_TOKEN;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:09}", frac);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Headline for a pending transaction:
/// `0x5fd8…: 54280 💎 -> 0:8e97… (6/7)`
pub fn transaction_line(tx: &Transaction) -> String {
    format!(
        "{}: {} 💎 -> {} ({})",
        tx.id,
        format_amount(tx.value),
        tx.dest,
        tx.progress()
    )
}

/// Status line for one custodian under a transaction: a signed/waiting
/// icon, then the public key, linked when the registry knows it
pub fn custodian_line(
    tx: &Transaction,
    custodian: &Custodian,
    matrix: &SignatureMatrix,
    known: &KnownCustodians,
) -> String {
    let icon = if matrix.is_signed(&tx.id, &custodian.pubkey) {
        "✍️"
    } else {
        "⏳"
    };
    match known.lookup(&custodian.pubkey) {
        Some(url) => format!("{}   {} ({})", icon, custodian.pubkey, url),
        None => format!("{}   {}", icon, custodian.pubkey),
    }
}

/// Full listing: one headline per transaction followed by a status line
/// per custodian, custodians in directory (index) order
pub fn transaction_listing(
    transactions: &[Transaction],
    custodians: &[Custodian],
    matrix: &SignatureMatrix,
    known: &KnownCustodians,
) -> Vec<String> {
    let mut lines = Vec::new();
    for tx in transactions {
        lines.push(transaction_line(tx));
        for custodian in custodians {
            lines.push(custodian_line(tx, custodian, matrix, known));
        }
    }
    lines
}
