//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. Every mutating command
//! opens the ledger, runs one operation, and saves.

pub mod funds;
pub mod history;
pub mod wallet;

pub use funds::{handle_funds_command, FundsCommands};
pub use history::{handle_history_command, HistoryArgs};
pub use wallet::{handle_wallet_command, WalletCommands};
