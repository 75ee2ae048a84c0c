//! Query filters and reductions over audit-log entries

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::models::Transaction;

/// Inclusive date range plus an optional wallet name
///
/// Unset bounds default to the beginning of time and "now".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub wallet: Option<String>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at the first second of `day`
    pub fn from_day(mut self, day: NaiveDate) -> Self {
        self.from = day.and_hms_opt(0, 0, 0);
        self
    }

    /// End at the last second of `day`
    pub fn to_day(mut self, day: NaiveDate) -> Self {
        self.to = day.and_hms_opt(23, 59, 59);
        self
    }

    pub fn from_date(mut self, date: NaiveDateTime) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDateTime) -> Self {
        self.to = Some(date);
        self
    }

    /// Only match entries of this wallet
    pub fn wallet(mut self, name: impl Into<String>) -> Self {
        self.wallet = Some(name.into());
        self
    }

    pub(crate) fn matches(&self, transaction: &Transaction, now: NaiveDateTime) -> bool {
        let from = self.from.unwrap_or(NaiveDateTime::MIN);
        let to = self.to.unwrap_or(now);

        (from..=to).contains(&transaction.date)
            && self
                .wallet
                .as_deref()
                .map_or(true, |wallet| transaction.wallet == wallet)
    }
}

/// Per-wallet reduction of a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSummary {
    pub total: u64,
    pub count: usize,
}

/// Totals per wallet, in the order each wallet first appears
pub fn aggregate(matches: &[&Transaction]) -> IndexMap<String, WalletSummary> {
    let mut summaries: IndexMap<String, WalletSummary> = IndexMap::new();
    for transaction in matches {
        let summary = summaries.entry(transaction.wallet.clone()).or_default();
        summary.total = summary.total.saturating_add(transaction.amount);
        summary.count += 1;
    }
    summaries
}

/// Sum of the amounts of a result set
pub fn sum(matches: &[&Transaction]) -> u64 {
    matches
        .iter()
        .fold(0u64, |total, t| total.saturating_add(t.amount))
}

/// A query's matches together with their reductions
#[derive(Debug, Clone)]
pub struct HistoryReport<'a> {
    pub matches: Vec<&'a Transaction>,
    pub per_wallet: IndexMap<String, WalletSummary>,
    pub total: u64,
    pub count: usize,
}

impl<'a> HistoryReport<'a> {
    pub fn new(matches: Vec<&'a Transaction>) -> Self {
        Self {
            per_wallet: aggregate(&matches),
            total: sum(&matches),
            count: matches.len(),
            matches,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
