//! CLI command handlers
//!
//! Each subcommand maps onto one wallet interaction: fetch fresh state
//! through the client, run it through the reconciliation core, and print.
//! Nothing is cached between invocations.

use crate::client::{LocalWalletHost, MultisigClient};
use crate::reconcile::{build_matrix, normalize_custodians, parse_transactions};
use crate::render::{self, KnownCustodians};
use crate::session::{KeyPair, KeyStore};
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Smallest currency units per whole token
const UNITS_PER_TOKEN: f64 = 1_000_000_000.0;

/// Application state
pub struct AppState {
    pub keystore: KeyStore,
    pub host: LocalWalletHost,
    pub known: KnownCustodians,
}

impl AppState {
    /// Initialize application state under the data directory
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let keystore = KeyStore::open(&data_dir)?;
        let host = LocalWalletHost::open(&data_dir)?;

        // Optional registry of recognized custodian keys
        let known_path = data_dir.join("custodians.json");
        let known = if known_path.exists() {
            KnownCustodians::load(&known_path)?
        } else {
            KnownCustodians::default()
        };

        Ok(Self {
            keystore,
            host,
            known,
        })
    }

    fn require_login(&self) -> CliResult<Option<KeyPair>> {
        let keys = self.keystore.get()?;
        if keys.is_none() {
            println!("❌ Not logged in. Run: msig login --phrase \"<seed words>\"");
        }
        Ok(keys)
    }
}

/// Derive signing keys from a seed phrase and store the session
pub fn cmd_login(state: &AppState, phrase: &str) -> CliResult<()> {
    let keys = state.host.derive_sign_keys(phrase)?;
    state.keystore.set(&keys)?;

    println!("🔐 Logged in as {}", keys.public);
    Ok(())
}

/// Clear the stored session
pub fn cmd_logout(state: &AppState) -> CliResult<()> {
    state.keystore.clear()?;
    println!("👋 Logged out.");
    Ok(())
}

/// Show whether a session is active
pub fn cmd_status(state: &AppState) -> CliResult<()> {
    match state.keystore.get()? {
        Some(keys) => println!("🔐 Logged in as {}", keys.public),
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Create a hosted multisig wallet
pub fn cmd_init(
    state: &mut AppState,
    address: &str,
    custodians: &[String],
    required: u32,
) -> CliResult<()> {
    state.host.create_account(address, custodians, required)?;

    println!("✅ Wallet created!");
    println!("   📍 Address: {}", address);
    println!("   🔏 Quorum: {}-of-{}", required, custodians.len());
    Ok(())
}

/// List a wallet's custodians, sorted by mask bit index
pub fn cmd_custodians(state: &AppState, address: &str) -> CliResult<()> {
    let custodians = normalize_custodians(&state.host.get_custodians(address)?)?;

    println!("------ CUSTODIAN PUB KEYS ------");
    for custodian in &custodians {
        match state.known.lookup(&custodian.pubkey) {
            Some(url) => println!("{} ({})", custodian.pubkey, url),
            None => println!("{}", custodian.pubkey),
        }
    }
    Ok(())
}

/// List pending transactions with per-custodian signature status
pub fn cmd_transactions(state: &AppState, address: &str) -> CliResult<()> {
    // Two independent reads; they may observe different block heights
    let transactions = parse_transactions(&state.host.get_transactions(address)?)?;
    let custodians = normalize_custodians(&state.host.get_custodians(address)?)?;

    if transactions.is_empty() {
        println!("📭 No pending transactions.");
        return Ok(());
    }

    let matrix = build_matrix(&transactions, &custodians);

    println!("------ TRANSACTIONS ------");
    for line in render::transaction_listing(&transactions, &custodians, &matrix, &state.known) {
        println!("{}", line);
    }
    Ok(())
}

/// Submit a new transfer from the wallet
pub fn cmd_submit(state: &mut AppState, address: &str, to: &str, amount: f64) -> CliResult<()> {
    let Some(keys) = state.require_login()? else {
        return Ok(());
    };

    let value = (amount * UNITS_PER_TOKEN).round() as u64;
    let txid = state.host.submit_transaction(address, to, value, &keys)?;

    println!("📤 Transaction submitted:");
    println!("   ID: {}", txid);
    println!("   To: {}", to);
    println!("   Amount: {} 💎", render::format_amount(value));
    Ok(())
}

/// Confirm (sign) a pending transaction
pub fn cmd_confirm(state: &mut AppState, address: &str, txid: &str) -> CliResult<()> {
    let Some(keys) = state.require_login()? else {
        return Ok(());
    };

    state.host.confirm_transaction(address, txid, &keys)?;

    println!("✍️  Confirmation recorded for {}", txid);
    println!(
        "   Run 'msig transactions --address {}' to see updated status.",
        address
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0:feedface";

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        AppState::new(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_login_logout_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        cmd_login(&state, "winter apple brave cost").unwrap();
        assert!(state.keystore.get().unwrap().is_some());

        cmd_logout(&state).unwrap();
        assert!(state.keystore.get().unwrap().is_none());
    }

    #[test]
    fn test_submit_and_confirm_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);

        let alice = state.host.derive_sign_keys("alice").unwrap();
        let bob = state.host.derive_sign_keys("bob").unwrap();
        cmd_init(&mut state, ADDRESS, &[alice.public, bob.public], 2).unwrap();

        cmd_login(&state, "alice").unwrap();
        cmd_submit(&mut state, ADDRESS, "0:abcd", 1.5).unwrap();

        let pending = state.host.get_transactions(ADDRESS).unwrap();
        assert_eq!(pending.len(), 1);
        // 1.5 tokens scaled to the smallest unit
        assert_eq!(pending[0].value, "0x59682f00");
        let txid = pending[0].id.clone();

        cmd_login(&state, "bob").unwrap();
        cmd_confirm(&mut state, ADDRESS, &txid).unwrap();
        assert!(state.host.get_transactions(ADDRESS).unwrap().is_empty());
    }

    #[test]
    fn test_submit_without_login_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);

        let alice = state.host.derive_sign_keys("alice").unwrap();
        cmd_init(&mut state, ADDRESS, &[alice.public], 1).unwrap();

        cmd_submit(&mut state, ADDRESS, "0:abcd", 1.0).unwrap();
        assert!(state.host.get_transactions(ADDRESS).unwrap().is_empty());
    }

    #[test]
    fn test_listing_commands_run_against_host() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);

        let alice = state.host.derive_sign_keys("alice").unwrap();
        let bob = state.host.derive_sign_keys("bob").unwrap();
        cmd_init(&mut state, ADDRESS, &[alice.public, bob.public], 2).unwrap();

        cmd_login(&state, "alice").unwrap();
        cmd_submit(&mut state, ADDRESS, "0:abcd", 2.0).unwrap();

        cmd_custodians(&state, ADDRESS).unwrap();
        cmd_transactions(&state, ADDRESS).unwrap();
        cmd_status(&state).unwrap();
    }
}
