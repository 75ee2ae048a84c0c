//! Balance aggregations

use super::Ledger;

/// Wallets counted as non-usable savings unless configured otherwise
pub const DEFAULT_RESERVED_WALLETS: [&str; 5] =
    ["savings", "emergencies", "investing", "travels", "retirement"];

impl Ledger {
    /// Sum of every wallet's balance
    pub fn total(&self) -> u64 {
        self.sum_where(|_| true)
    }

    /// Money in wallets not reserved as savings
    pub fn usable(&self) -> u64 {
        self.sum_where(|name| !self.is_reserved(name))
    }

    /// Money in reserved savings wallets
    pub fn non_usable(&self) -> u64 {
        self.sum_where(|name| self.is_reserved(name))
    }

    /// Sum of the named wallets
    ///
    /// Returns `None` if no names are given or any of them is unknown.
    pub fn total_on<S: AsRef<str>>(&self, names: &[S]) -> Option<u64> {
        if names.is_empty() || !self.all_known(names) {
            return None;
        }
        Some(self.sum_where(|name| names.iter().any(|n| n.as_ref() == name)))
    }

    /// Sum of every wallet except the named ones
    ///
    /// Returns `None` if any of the names is unknown.
    pub fn total_except<S: AsRef<str>>(&self, names: &[S]) -> Option<u64> {
        if !self.all_known(names) {
            return None;
        }
        Some(self.sum_where(|name| !names.iter().any(|n| n.as_ref() == name)))
    }

    fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|r| r == name)
    }

    fn all_known<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().all(|n| self.contains(n.as_ref()))
    }

    fn sum_where(&self, include: impl Fn(&str) -> bool) -> u64 {
        self.wallets
            .iter()
            .filter(|w| include(&w.name))
            .fold(0u64, |sum, w| sum.saturating_add(w.balance))
    }
}
