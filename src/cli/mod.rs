//! Command-line interface

pub mod commands;

pub use commands::{
    cmd_confirm, cmd_custodians, cmd_init, cmd_login, cmd_logout, cmd_status, cmd_submit,
    cmd_transactions, AppState, CliResult,
};
