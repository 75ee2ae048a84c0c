//! User settings for the wallet ledger

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::DEFAULT_RESERVED_WALLETS;
use crate::models::DEFAULT_DESCRIPTION;

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Wallet names counted as non-usable savings
    #[serde(default = "default_reserved_wallets")]
    pub reserved_wallets: Vec<String>,

    /// Description recorded for deductions given none
    #[serde(default = "default_description")]
    pub default_description: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_reserved_wallets() -> Vec<String> {
    DEFAULT_RESERVED_WALLETS
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            reserved_wallets: default_reserved_wallets(),
            default_description: default_description(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// Defaults are not written back; call [`Settings::save`] to persist them.
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&settings_path)?;
        serde_json::from_str(&contents).map_err(|e| {
            LedgerError::Config(format!(
                "Failed to parse {}: {}",
                settings_path.display(),
                e
            ))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), contents)?;
        Ok(())
    }
}
