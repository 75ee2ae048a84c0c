//! Storage layer for the wallet ledger
//!
//! Ties the wallet snapshot and the audit log to a [`Ledger`]: `open` loads
//! one, `save` persists the wallets and flushes queued transactions, and
//! `reset` rolls the wallets back to the last save.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use snapshot::SnapshotStore;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::audit::TransactionQueue;
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::history::TransactionHistory;
use crate::ledger::Ledger;

/// Main storage coordinator
#[derive(Debug)]
pub struct Storage {
    paths: LedgerPaths,
    settings: Settings,
    snapshots: SnapshotStore,
    log_path: PathBuf,
}

impl Storage {
    /// Create a Storage instance, creating the data directory if needed
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;

        Ok(Self {
            snapshots: SnapshotStore::new(paths.snapshot_file()),
            log_path: paths.audit_log(),
            settings,
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Load the ledger from the last snapshot
    ///
    /// Creates the snapshot (with a default `main`) and the audit log on
    /// first use. Settings decide the reserved wallets and the default
    /// deduction description.
    pub fn open(&self) -> LedgerResult<Ledger> {
        let wallets = self.snapshots.load()?;
        TransactionQueue::init_log(&self.log_path)?;

        info!(wallets = wallets.len(), dir = %self.paths.base_dir().display(), "opened ledger");
        Ok(Ledger::from_wallets(wallets)
            .with_reserved(self.settings.reserved_wallets.iter().cloned())
            .with_default_description(self.settings.default_description.clone()))
    }

    /// Persist the wallets, then append queued transactions to the audit log
    ///
    /// The queued rows are encoded and the audit log checked before the
    /// snapshot is touched, so a missing log leaves both files as they were.
    /// Returns the number of transactions written.
    pub fn save(&self, ledger: &mut Ledger) -> LedgerResult<usize> {
        let rows = ledger.queue().prepare(&self.log_path)?;
        self.snapshots.save(ledger.wallets())?;
        ledger.queue_mut().commit(&self.log_path, &rows)
    }

    /// Discard unsaved changes, including queued transactions
    pub fn reset(&self, ledger: &mut Ledger) -> LedgerResult<()> {
        let wallets = self.snapshots.reset()?;
        ledger.replace_wallets(wallets);
        info!("reset ledger to last saved snapshot");
        Ok(())
    }

    /// Reader over the audit log
    pub fn history(&self) -> TransactionHistory {
        TransactionHistory::new(&self.log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Wallet;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(LedgerPaths::with_base_dir(temp_dir.path())).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_open_fresh_creates_files() {
        let (temp_dir, storage) = create_test_storage();
        let ledger = storage.open().unwrap();

        assert_eq!(ledger.wallets(), &[Wallet::new("main")]);
        assert!(temp_dir.path().join("wallets.json").exists());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("transactions.csv")).unwrap(),
            "date,wallet,transaction_type,amount,description,balance_before,balance_after\n"
        );
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let (_temp_dir, storage) = create_test_storage();
        let mut ledger = storage.open().unwrap();
        ledger.add_wallet("emergencies", 500, 20, 50000).unwrap();
        ledger.add_wallet("charity", 200, 10, 0).unwrap();
        ledger.add("main", 1500).unwrap();
        storage.save(&mut ledger).unwrap();

        let reloaded = storage.open().unwrap();
        assert_eq!(reloaded.wallets(), ledger.wallets());
        assert_eq!(reloaded.names(), vec!["main", "emergencies", "charity"]);
    }

    #[test]
    fn test_save_flushes_deduction() {
        let (temp_dir, storage) = create_test_storage();
        let mut ledger = storage.open().unwrap();
        ledger.add("main", 1500).unwrap();
        ledger.deduct("main", Some("groceries"), Some(500)).unwrap();

        assert_eq!(storage.save(&mut ledger).unwrap(), 1);
        assert!(ledger.queue().is_empty());

        let log = std::fs::read_to_string(temp_dir.path().join("transactions.csv")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(",main,deduction,500,groceries,1500,1000"));
    }

    #[test]
    fn test_reset_rolls_back_to_last_save() {
        let (_temp_dir, storage) = create_test_storage();
        let mut ledger = storage.open().unwrap();
        ledger.add("main", 100).unwrap();
        storage.save(&mut ledger).unwrap();

        ledger.add("main", 900).unwrap();
        ledger.deduct("main", None, Some(50)).unwrap();
        ledger.add_wallet("charity", 0, 0, 0).unwrap();
        storage.reset(&mut ledger).unwrap();

        assert_eq!(ledger.wallets(), &[Wallet::with_values("main", 100, 0, 0)]);
        assert!(ledger.queue().is_empty());
    }

    #[test]
    fn test_open_applies_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());
        let mut settings = Settings::default();
        settings.reserved_wallets = vec!["main".into()];
        settings.default_description = "misc".into();
        settings.save(&paths).unwrap();

        let storage = Storage::new(paths).unwrap();
        let mut ledger = storage.open().unwrap();
        ledger.add("main", 10).unwrap();

        assert_eq!(ledger.reserved(), &["main".to_string()]);
        assert_eq!(ledger.non_usable(), 10);
        let txn = ledger.deduct("main", None, None).unwrap().unwrap();
        assert_eq!(txn.description, "misc");
    }

    #[test]
    fn test_history_reads_saved_log() {
        let (_temp_dir, storage) = create_test_storage();
        let mut ledger = storage.open().unwrap();
        ledger.add("main", 300).unwrap();
        ledger.deduct("main", Some("a"), Some(100)).unwrap();
        ledger.deduct("main", Some("b"), Some(50)).unwrap();
        storage.save(&mut ledger).unwrap();

        let mut history = storage.history();
        assert_eq!(history.load().unwrap(), 2);
        assert_eq!(history.transactions()[1].balance_after, 150);
    }

    #[test]
    fn test_save_without_audit_log_keeps_snapshot() {
        let (temp_dir, storage) = create_test_storage();
        let mut ledger = storage.open().unwrap();
        ledger.add("main", 1500).unwrap();
        storage.save(&mut ledger).unwrap();

        ledger.deduct("main", None, Some(500)).unwrap();
        std::fs::remove_file(temp_dir.path().join("transactions.csv")).unwrap();

        assert!(storage.save(&mut ledger).unwrap_err().is_not_found());
        assert_eq!(ledger.queue().len(), 1);

        let reloaded = storage.open().unwrap();
        assert_eq!(reloaded.get_wallet("main").unwrap().balance, 1500);
    }
}
