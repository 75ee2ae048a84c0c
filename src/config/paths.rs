//! Path management for the wallet ledger
//!
//! ## Path Resolution Order
//!
//! 1. `WALLET_LEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME` or `~/.config` on
//!    Unix, `%APPDATA%` on Windows) joined with `wallet-ledger`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "WALLET_LEDGER_DATA_DIR";

const APP_DIR: &str = "wallet-ledger";

/// Locations of every file the ledger reads or writes
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns a config error if no home directory can be determined.
    pub fn new() -> LedgerResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Settings file (`config.json`)
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Wallet snapshot (`wallets.json`)
    pub fn snapshot_file(&self) -> PathBuf {
        self.base_dir.join("wallets.json")
    }

    /// Append-only audit log (`transactions.csv`)
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("transactions.csv")
    }

    /// Create the base directory if it is missing
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create data directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}

fn resolve_default_path() -> LedgerResult<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join(APP_DIR))
        .ok_or_else(|| {
            LedgerError::Config(format!(
                "Could not determine a home directory; set {}",
                DATA_DIR_ENV
            ))
        })
}
