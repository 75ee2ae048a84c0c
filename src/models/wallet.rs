//! Wallet model
//!
//! A wallet is a named sub-account holding part of the owner's money.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the distinguished sink wallet
///
/// `main` receives deposit remainders, amounts swept over a cap, and the
/// balances of deleted wallets.
pub const MAIN_WALLET: &str = "main";

/// A named sub-account
///
/// Wallets perform no validation of their own; the [`Ledger`](crate::ledger::Ledger)
/// enforces every invariant before touching them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique name within a ledger
    pub name: String,

    /// Current balance in the smallest currency unit
    #[serde(default)]
    pub balance: u64,

    /// Share of future deposits routed here, 0..=100
    #[serde(default)]
    pub percent: u8,

    /// Maximum balance; 0 means unlimited
    #[serde(default)]
    pub cap: u64,
}

impl Wallet {
    /// Create an empty, uncapped wallet
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_values(name, 0, 0, 0)
    }

    /// Create a wallet with every field given
    pub fn with_values(name: impl Into<String>, balance: u64, percent: u8, cap: u64) -> Self {
        Self {
            name: name.into(),
            balance,
            percent,
            cap,
        }
    }

    /// Increase the balance
    pub fn credit(&mut self, amount: u64) -> &mut Self {
        self.balance = self.balance.saturating_add(amount);
        self
    }

    /// Decrease the balance
    pub fn debit(&mut self, amount: u64) -> &mut Self {
        self.balance = self.balance.saturating_sub(amount);
        self
    }

    pub fn is_main(&self) -> bool {
        self.name == MAIN_WALLET
    }

    /// Whether a non-zero cap is set
    pub fn is_capped(&self) -> bool {
        self.cap != 0
    }

    /// Amount by which the balance exceeds the cap (0 when uncapped)
    pub fn excess(&self) -> u64 {
        if self.is_capped() {
            self.balance.saturating_sub(self.cap)
        } else {
            0
        }
    }

    /// Zero balance, percent, and cap
    pub fn clear(&mut self) {
        self.balance = 0;
        self.percent = 0;
        self.cap = 0;
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ${} ({}%)", self.name, self.balance, self.percent)
    }
}
