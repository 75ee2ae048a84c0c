//! Read-only access to the audit log
//!
//! [`TransactionHistory`] reloads the CSV log written by the
//! [`TransactionQueue`](crate::audit::TransactionQueue) and answers
//! date-range and wallet queries over it. It never writes.

mod query;

pub use query::{aggregate, sum, HistoryReport, QueryFilter, WalletSummary};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::time::{Clock, SystemClock};

/// Loaded audit-log entries
pub struct TransactionHistory {
    path: PathBuf,
    transactions: Vec<Transaction>,
    clock: Arc<dyn Clock>,
}

impl TransactionHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            transactions: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different time source for the default upper query bound
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries from the last successful [`load`](Self::load)
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Parse every record of the audit log, replacing what was loaded before
    ///
    /// A missing log is `NotFound`; a record that fails to parse aborts the
    /// whole load as `Malformed` and leaves nothing loaded. Returns the number
    /// of entries read.
    pub fn load(&mut self) -> LedgerResult<usize> {
        self.transactions.clear();

        if !self.path.exists() {
            return Err(LedgerError::NotFound {
                entity_type: "Audit log",
                identifier: self.path.display().to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        let transactions = reader
            .deserialize()
            .collect::<Result<Vec<Transaction>, _>>()?;

        self.transactions = transactions;
        info!(count = self.transactions.len(), path = %self.path.display(), "loaded audit log");
        Ok(self.transactions.len())
    }

    /// Loaded entries matching the filter, in log order
    pub fn query(&self, filter: &QueryFilter) -> Vec<&Transaction> {
        let now = self.clock.now();
        let matches: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| filter.matches(t, now))
            .collect();
        debug!(matched = matches.len(), of = self.transactions.len(), "queried history");
        matches
    }

    /// Run a query and reduce its matches
    pub fn query_report(&self, filter: &QueryFilter) -> HistoryReport<'_> {
        HistoryReport::new(self.query(filter))
    }
}

impl std::fmt::Debug for TransactionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionHistory")
            .field("path", &self.path)
            .field("transactions", &self.transactions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_day, TransactionType};
    use crate::time::FixedClock;
    use tempfile::TempDir;

    const LOG: &str = "\
date,wallet,transaction_type,amount,description,balance_before,balance_after
01-05-2023 00:00:00,main,deduction,60,test description 1,3,0
12-05-2023 00:00:00,emergencies,deduction,50,test description 2,3,0
20-05-2023 00:00:00,charity,deduction,40,test description 3,3,0
03-06-2023 00:00:00,main,deduction,30,test description 4,3,0
10-06-2023 00:00:00,charity,deduction,20,test description 5,3,0
02-07-2023 00:00:00,main,deduction,10,test description 6,3,0
";

    fn create_test_history(contents: &str) -> (TempDir, TransactionHistory) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        std::fs::write(&path, contents).unwrap();

        let now = parse_day("01-01-2024").unwrap().and_hms_opt(0, 0, 0).unwrap();
        let history = TransactionHistory::new(path).with_clock(Arc::new(FixedClock(now)));
        (temp_dir, history)
    }

    fn loaded() -> (TempDir, TransactionHistory) {
        let (temp_dir, mut history) = create_test_history(LOG);
        history.load().unwrap();
        (temp_dir, history)
    }

    #[test]
    fn test_load_transactions() {
        let (_temp_dir, mut history) = create_test_history(LOG);
        assert_eq!(history.load().unwrap(), 6);

        let first = &history.transactions()[0];
        assert_eq!(first.wallet, "main");
        assert_eq!(first.transaction_type, TransactionType::Deduction);
        assert_eq!(first.amount, 60);
        assert_eq!(first.description, "test description 1");
        assert_eq!((first.balance_before, first.balance_after), (3, 0));
    }

    #[test]
    fn test_load_missing_log() {
        let temp_dir = TempDir::new().unwrap();
        let mut history = TransactionHistory::new(temp_dir.path().join("missing.csv"));

        assert!(history.load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_malformed_amount_aborts() {
        let contents = format!("{}01-08-2023 00:00:00,main,deduction,ten,bad,3,0\n", LOG);
        let (_temp_dir, mut history) = create_test_history(&contents);

        assert!(history.load().unwrap_err().is_malformed());
        assert!(history.transactions().is_empty());
    }

    #[test]
    fn test_load_malformed_date_aborts() {
        let contents = format!("{}2023-08-01,main,deduction,10,bad,3,0\n", LOG);
        let (_temp_dir, mut history) = create_test_history(&contents);

        assert!(history.load().unwrap_err().is_malformed());
    }

    #[test]
    fn test_query_all() {
        let (_temp_dir, history) = loaded();
        assert_eq!(history.query(&QueryFilter::new()).len(), 6);
    }

    #[test]
    fn test_query_by_wallet() {
        let (_temp_dir, history) = loaded();
        let matches = history.query(&QueryFilter::new().wallet("main"));

        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|t| t.wallet == "main"));
    }

    #[test]
    fn test_query_by_date() {
        let (_temp_dir, history) = loaded();
        let filter = QueryFilter::new()
            .from_day(parse_day("01-06-2023").unwrap())
            .to_day(parse_day("30-06-2023").unwrap());

        let matches = history.query(&filter);
        assert_eq!(matches.len(), 2);
        assert!(matches
            .iter()
            .all(|t| t.description == "test description 4" || t.description == "test description 5"));
    }

    #[test]
    fn test_query_by_from_date() {
        let (_temp_dir, history) = loaded();
        let filter = QueryFilter::new().from_day(parse_day("01-06-2023").unwrap());
        assert_eq!(history.query(&filter).len(), 3);
    }

    #[test]
    fn test_query_by_date_and_wallet() {
        let (_temp_dir, history) = loaded();
        let filter = QueryFilter::new()
            .from_day(parse_day("01-05-2023").unwrap())
            .to_day(parse_day("30-06-2023").unwrap())
            .wallet("main");
        assert_eq!(history.query(&filter).len(), 2);
    }

    #[test]
    fn test_query_without_matches_is_empty() {
        let (_temp_dir, history) = loaded();
        assert!(history.query(&QueryFilter::new().wallet("invalid_wallet_name")).is_empty());

        let filter = QueryFilter::new()
            .from_day(parse_day("01-01-2022").unwrap())
            .to_day(parse_day("01-02-2022").unwrap());
        assert!(history.query_report(&filter).is_empty());
    }

    #[test]
    fn test_query_report_totals() {
        let (_temp_dir, history) = loaded();
        let report = history.query_report(&QueryFilter::new().wallet("main"));

        assert_eq!(report.total, 100);
        assert_eq!(report.count, 3);
        assert_eq!(report.per_wallet["main"], WalletSummary { total: 100, count: 3 });
    }

    #[test]
    fn test_reads_what_the_queue_writes() {
        use crate::audit::TransactionQueue;
        use crate::models::parse_date;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        TransactionQueue::init_log(&path).unwrap();

        let mut queue = TransactionQueue::new();
        let written = Transaction::deduction(
            parse_date("12-06-1995 00:00:00").unwrap(),
            "main",
            "rent, june",
            1500,
            1000,
        );
        queue.queue(written.clone());
        queue.flush(&path).unwrap();

        let mut history = TransactionHistory::new(&path);
        assert_eq!(history.load().unwrap(), 1);
        assert_eq!(history.transactions(), &[written]);
    }
}
