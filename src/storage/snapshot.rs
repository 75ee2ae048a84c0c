//! Wallet snapshot persistence
//!
//! The snapshot is a JSON array of wallet records in ledger order. It is
//! the only durable copy of the wallets; `reset` rolls back to it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::info;

use super::file_io::{read_json, write_json_atomic};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Wallet, MAIN_WALLET};

/// Reads and writes one snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted wallets
    ///
    /// A missing or empty snapshot is replaced on disk by a single empty
    /// `main` wallet, which is returned. A snapshot with repeated names, a
    /// percent above 100, or a balance over its cap is `Malformed`.
    pub fn load(&self) -> LedgerResult<Vec<Wallet>> {
        if let Some(wallets) = read_json::<Vec<Wallet>, _>(&self.path)? {
            check_wallets(&wallets)?;
            return Ok(wallets);
        }

        let wallets = vec![Wallet::new(MAIN_WALLET)];
        self.save(&wallets)?;
        info!(path = %self.path.display(), "created snapshot with default main wallet");
        Ok(wallets)
    }

    /// Overwrite the snapshot with the given wallets
    pub fn save(&self, wallets: &[Wallet]) -> LedgerResult<()> {
        write_json_atomic(&self.path, wallets)?;
        info!(count = wallets.len(), path = %self.path.display(), "saved snapshot");
        Ok(())
    }

    /// Reload the last saved wallets, discarding whatever is in memory
    pub fn reset(&self) -> LedgerResult<Vec<Wallet>> {
        self.load()
    }
}

fn check_wallets(wallets: &[Wallet]) -> LedgerResult<()> {
    let mut seen = HashSet::new();
    for wallet in wallets {
        if !seen.insert(wallet.name.as_str()) {
            return Err(LedgerError::Malformed(format!(
                "snapshot lists wallet '{}' more than once",
                wallet.name
            )));
        }
        if wallet.percent > 100 {
            return Err(LedgerError::Malformed(format!(
                "wallet '{}' has percent {}, above 100",
                wallet.name, wallet.percent
            )));
        }
        if wallet.cap != 0 && wallet.balance > wallet.cap {
            return Err(LedgerError::Malformed(format!(
                "wallet '{}' holds {} over its cap of {}",
                wallet.name, wallet.balance, wallet.cap
            )));
        }
    }
    Ok(())
}
