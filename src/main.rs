//! msig: multi-signature wallet console
//!
//! Command-line entry point for wallet operations.

use clap::{Parser, Subcommand};
use msig_console::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "msig")]
#[command(version = "0.1.0")]
#[command(about = "A console for operating multi-signature wallets", long_about = None)]
struct Cli {
    /// Data directory for session and wallet state
    #[arg(short, long, default_value = ".msig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a seed phrase
    Login {
        /// Seed phrase to derive signing keys from
        #[arg(short, long)]
        phrase: String,
    },

    /// Clear the stored session
    Logout,

    /// Show whether a session is active
    Status,

    /// Create a hosted multisig wallet
    Init {
        /// Wallet address
        #[arg(short, long)]
        address: String,

        /// Custodian public keys (repeatable); bit indexes follow the
        /// order given here
        #[arg(short, long = "custodian", required = true)]
        custodians: Vec<String>,

        /// Signatures required to execute a transaction
        #[arg(short, long)]
        required: u32,
    },

    /// List a wallet's custodians
    Custodians {
        /// Wallet address
        #[arg(short, long)]
        address: String,
    },

    /// List pending transactions with signature status
    Transactions {
        /// Wallet address
        #[arg(short, long)]
        address: String,
    },

    /// Submit a new transfer
    Submit {
        /// Wallet address to send from
        #[arg(short, long)]
        address: String,

        /// Recipient address
        #[arg(short, long)]
        to: String,

        /// Amount in whole tokens
        #[arg(long)]
        amount: f64,
    },

    /// Confirm (sign) a pending transaction
    Confirm {
        /// Wallet address
        #[arg(short, long)]
        address: String,

        /// Transaction id to confirm
        #[arg(short, long)]
        txid: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut state = AppState::new(cli.data_dir.clone())?;

    match cli.command {
        Commands::Login { phrase } => cli::cmd_login(&state, &phrase)?,
        Commands::Logout => cli::cmd_logout(&state)?,
        Commands::Status => cli::cmd_status(&state)?,

        Commands::Init {
            address,
            custodians,
            required,
        } => cli::cmd_init(&mut state, &address, &custodians, required)?,

        Commands::Custodians { address } => cli::cmd_custodians(&state, &address)?,
        Commands::Transactions { address } => cli::cmd_transactions(&state, &address)?,

        Commands::Submit {
            address,
            to,
            amount,
        } => cli::cmd_submit(&mut state, &address, &to, amount)?,

        Commands::Confirm { address, txid } => cli::cmd_confirm(&mut state, &address, &txid)?,
    }

    Ok(())
}
