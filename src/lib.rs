//! Wallet Ledger - personal multi-wallet money ledger
//!
//! A single owner's money is split across named wallets, each with a
//! balance, a share of future deposits, and an optional cap. Deposits are
//! distributed by percent, anything over a cap spills into the `main`
//! wallet, and deductions are queued and appended to a CSV audit log when
//! the ledger is saved.
//!
//! # Architecture
//!
//! - `config`: data-directory resolution and user settings
//! - `error`: custom error types
//! - `models`: wallets and audit-log transactions
//! - `ledger`: the in-memory wallet engine
//! - `storage`: JSON snapshot persistence and the save/reset cycle
//! - `audit`: the transaction queue and audit-log writer
//! - `history`: read-only queries over the audit log
//! - `display`, `cli`, `logging`: pieces used by the `wallet` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet_ledger::config::LedgerPaths;
//! use wallet_ledger::storage::Storage;
//!
//! let storage = Storage::new(LedgerPaths::new()?)?;
//! let mut ledger = storage.open()?;
//! ledger.deposit(1000)?;
//! storage.save(&mut ledger)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod storage;
pub mod time;

pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use models::{Transaction, Wallet, MAIN_WALLET};
