//! Audit logging for the wallet ledger
//!
//! Deductions are recorded in an append-only CSV audit log. Records are
//! buffered in a [`TransactionQueue`] owned by the ledger and only written
//! when the ledger is saved, so a reset can drop them without touching disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet_ledger::audit::TransactionQueue;
//!
//! TransactionQueue::init_log(&log_path)?;
//! queue.queue(transaction);
//! queue.flush(&log_path)?;
//! ```

mod queue;

pub use queue::{TransactionQueue, LOG_HEADERS};
