//! Transaction queue
//!
//! Ledger mutations queue their audit records here; nothing reaches the
//! audit log until [`TransactionQueue::flush`] runs as part of a save.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

/// Column header written as the first line of every audit log
pub const LOG_HEADERS: [&str; 7] = [
    "date",
    "wallet",
    "transaction_type",
    "amount",
    "description",
    "balance_before",
    "balance_after",
];

/// In-memory FIFO buffer of audit records awaiting flush
#[derive(Debug, Clone, Default)]
pub struct TransactionQueue {
    pending: Vec<Transaction>,
}

impl TransactionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the back of the queue
    pub fn queue(&mut self, transaction: Transaction) {
        debug!(wallet = %transaction.wallet, amount = transaction.amount, "queued transaction");
        self.pending.push(transaction);
    }

    /// Records waiting to be flushed, oldest first
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discard every queued record without writing it
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Append every queued record to the audit log, then empty the queue
    ///
    /// The log must already exist (see [`TransactionQueue::init_log`]); a
    /// missing log is an error and leaves the queue untouched. Returns the
    /// number of records written.
    pub fn flush(&mut self, log_path: &Path) -> LedgerResult<usize> {
        let rows = self.prepare(log_path)?;
        self.commit(log_path, &rows)
    }

    /// Check the audit log is present and encode every queued record
    ///
    /// Nothing is written; pass the result to [`TransactionQueue::commit`].
    pub fn prepare(&self, log_path: &Path) -> LedgerResult<Vec<u8>> {
        Self::require_log(log_path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        for transaction in &self.pending {
            writer.serialize(transaction)?;
        }
        writer
            .into_inner()
            .map_err(|err| LedgerError::from(err.into_error()))
    }

    /// Append rows produced by [`TransactionQueue::prepare`] in a single write
    ///
    /// The queue is only emptied once the write succeeded.
    pub fn commit(&mut self, log_path: &Path, rows: &[u8]) -> LedgerResult<usize> {
        Self::require_log(log_path)?;
        if self.pending.is_empty() {
            return Ok(0);
        }

        let mut file = OpenOptions::new().append(true).open(log_path)?;
        file.write_all(rows)?;
        file.flush()?;

        let written = self.pending.len();
        self.pending.clear();
        info!(count = written, path = %log_path.display(), "flushed transactions to audit log");
        Ok(written)
    }

    /// Fail with `NotFound` unless the audit log exists
    pub fn require_log(log_path: &Path) -> LedgerResult<()> {
        if log_path.exists() {
            return Ok(());
        }
        warn!(path = %log_path.display(), "audit log missing, keeping queued transactions");
        Err(LedgerError::NotFound {
            entity_type: "Audit log",
            identifier: log_path.display().to_string(),
        })
    }

    /// Create the audit log with its header line if it does not exist yet
    ///
    /// Returns `true` if the file was created, `false` if it already existed.
    pub fn init_log(log_path: &Path) -> LedgerResult<bool> {
        if log_path.exists() {
            return Ok(false);
        }

        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = File::create(log_path)?;
        writeln!(file, "{}", LOG_HEADERS.join(","))?;
        file.flush()?;

        info!(path = %log_path.display(), "created audit log");
        Ok(true)
    }
}
