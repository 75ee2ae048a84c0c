//! Core data models for the wallet ledger
//!
//! Wallets hold balances; transactions are the audit-log records produced
//! when money leaves a wallet.

pub mod transaction;
pub mod wallet;

pub use transaction::{
    parse_date, parse_day, Transaction, TransactionType, DATE_FORMAT, DAY_FORMAT,
    DEFAULT_DESCRIPTION,
};
pub use wallet::{Wallet, MAIN_WALLET};
