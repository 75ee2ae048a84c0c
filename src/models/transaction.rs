//! Transaction model
//!
//! Transactions are the records of the append-only audit log. Dates use the
//! fixed-width `dd-mm-yyyy hh:mm:ss` format both on disk and in queries.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// Format of the `date` column of the audit log
pub const DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Format of day-granularity query bounds
pub const DAY_FORMAT: &str = "%d-%m-%Y";

/// Description recorded when the caller gives none
pub const DEFAULT_DESCRIPTION: &str = "no_description";

/// Kind of ledger movement recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent out of a wallet
    Deduction,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deduction => write!(f, "deduction"),
        }
    }
}

/// A single audit-log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "audit_date")]
    pub date: NaiveDateTime,

    /// Name of the wallet at the time of the movement
    pub wallet: String,

    pub transaction_type: TransactionType,

    pub amount: u64,

    pub description: String,

    pub balance_before: u64,

    pub balance_after: u64,
}

impl Transaction {
    /// Build a deduction record from a wallet's balance before and after
    pub fn deduction(
        date: NaiveDateTime,
        wallet: impl Into<String>,
        description: impl Into<String>,
        balance_before: u64,
        balance_after: u64,
    ) -> Self {
        Self {
            date,
            wallet: wallet.into(),
            transaction_type: TransactionType::Deduction,
            amount: balance_before.saturating_sub(balance_after),
            description: description.into(),
            balance_before,
            balance_after,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} ${} \"{}\" ({} -> {})",
            self.date.format(DATE_FORMAT),
            self.wallet,
            self.transaction_type,
            self.amount,
            self.description,
            self.balance_before,
            self.balance_after
        )
    }
}

/// Parse a full `dd-mm-yyyy hh:mm:ss` timestamp
pub fn parse_date(s: &str) -> LedgerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        LedgerError::InvalidArgument(format!(
            "Invalid date '{}': {} (expected dd-mm-yyyy hh:mm:ss)",
            s, e
        ))
    })
}

/// Parse a `dd-mm-yyyy` day
pub fn parse_day(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).map_err(|e| {
        LedgerError::InvalidArgument(format!(
            "Invalid date '{}': {} (expected dd-mm-yyyy)",
            s, e
        ))
    })
}

mod audit_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
