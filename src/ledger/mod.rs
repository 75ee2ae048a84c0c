//! The ledger engine
//!
//! A [`Ledger`] owns an ordered collection of [`Wallet`]s and the
//! [`TransactionQueue`] their deductions are recorded into. Every mutating
//! operation validates its arguments up front and either applies its whole
//! effect or returns an error with the ledger untouched.
//!
//! The operations are split by concern:
//!
//! - this module: construction, lookups, and the wallet lifecycle
//!   (add, delete, rename, edit, merge, clear, wipe)
//! - `funds`: money movements (transfer, deduct, add, deposit) and caps
//! - `percent`: the deposit-percentage invariant
//! - `totals`: read-only balance aggregations

mod funds;
mod percent;
mod totals;

pub use funds::{Distribution, Share};
pub use totals::DEFAULT_RESERVED_WALLETS;

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::audit::TransactionQueue;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Wallet, DEFAULT_DESCRIPTION, MAIN_WALLET};
use crate::time::{Clock, SystemClock};

/// In-memory wallet collection with its pending audit records
pub struct Ledger {
    wallets: Vec<Wallet>,
    queue: TransactionQueue,
    reserved: Vec<String>,
    default_description: String,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Create a ledger with no wallets at all
    pub fn new() -> Self {
        Self::from_wallets(Vec::new())
    }

    /// Create a ledger holding only an empty `main` wallet
    pub fn with_main() -> Self {
        Self::from_wallets(vec![Wallet::new(MAIN_WALLET)])
    }

    /// Create a ledger around already-validated wallets (e.g. a loaded snapshot)
    ///
    /// No invariant is checked or corrected here.
    pub fn from_wallets(wallets: Vec<Wallet>) -> Self {
        Self {
            wallets,
            queue: TransactionQueue::new(),
            reserved: DEFAULT_RESERVED_WALLETS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            default_description: DEFAULT_DESCRIPTION.to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different time source for transaction timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the names counted as non-usable savings
    pub fn with_reserved<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the description recorded for deductions without one
    pub fn with_default_description(mut self, description: impl Into<String>) -> Self {
        self.default_description = description.into();
        self
    }

    /// All wallets in insertion order
    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wallet> {
        self.wallets.iter()
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Wallet names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.wallets.iter().map(|w| w.name.as_str()).collect()
    }

    /// Names counted as non-usable by [`Ledger::non_usable`]
    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }

    /// Audit records queued since the last save or reset
    pub fn queue(&self) -> &TransactionQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut TransactionQueue {
        &mut self.queue
    }

    /// Swap in a freshly loaded wallet set, dropping queued records
    pub(crate) fn replace_wallets(&mut self, wallets: Vec<Wallet>) {
        self.wallets = wallets;
        self.queue.clear();
    }

    /// Look up a wallet by exact name
    pub fn get_wallet(&self, name: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.wallets.iter().position(|w| w.name == name)
    }

    fn require(&self, name: &str) -> LedgerResult<usize> {
        self.index_of(name)
            .ok_or_else(|| LedgerError::wallet_not_found(name))
    }

    fn require_main(&self) -> LedgerResult<usize> {
        self.require(MAIN_WALLET)
    }

    /// Add a new wallet at the end of the collection
    ///
    /// Fails if the name is empty or taken, the percent exceeds 100, the
    /// balance is above a non-zero cap, or the new balance would overflow
    /// the ledger total.
    pub fn add_wallet(
        &mut self,
        name: &str,
        balance: u64,
        percent: u8,
        cap: u64,
    ) -> LedgerResult<&Wallet> {
        let name = validate_name(name)?;
        if self.contains(name) {
            return Err(LedgerError::wallet_exists(name));
        }
        validate_percent(percent)?;
        if cap != 0 && balance > cap {
            return Err(LedgerError::InvalidArgument(format!(
                "Balance {} is above the cap {} of wallet '{}'",
                balance, cap, name
            )));
        }
        self.ensure_room(balance)?;

        self.wallets
            .push(Wallet::with_values(name, balance, percent, cap));
        info!(wallet = name, balance, percent, cap, "added wallet");

        let index = self.wallets.len() - 1;
        Ok(&self.wallets[index])
    }

    /// Delete a wallet, moving its whole balance to `main` first
    ///
    /// Returns the amount moved. `main` itself can never be deleted.
    pub fn delete_wallet(&mut self, name: &str) -> LedgerResult<u64> {
        if name == MAIN_WALLET {
            return Err(LedgerError::InvalidArgument(
                "The main wallet cannot be deleted".into(),
            ));
        }
        self.require(name)?;
        self.require_main()?;

        let moved = self.transfer(name, MAIN_WALLET, None)?;
        let index = self.require(name)?;
        self.wallets.remove(index);

        info!(wallet = name, moved, "deleted wallet");
        Ok(moved)
    }

    /// Give a wallet a new, unused name
    pub fn rename(&mut self, old: &str, new: &str) -> LedgerResult<()> {
        if old == MAIN_WALLET {
            return Err(LedgerError::InvalidArgument(
                "The main wallet cannot be renamed".into(),
            ));
        }
        let new = validate_name(new)?;
        let index = self.require(old)?;
        if self.contains(new) {
            return Err(LedgerError::wallet_exists(new));
        }

        self.wallets[index].name = new.to_string();
        info!(from = old, to = new, "renamed wallet");
        Ok(())
    }

    /// Replace a wallet's name, balance, percent, and cap in one step
    ///
    /// `new_name` may equal `name`. A balance above the new cap is swept to
    /// `main` rather than rejected.
    pub fn edit(
        &mut self,
        name: &str,
        new_name: &str,
        balance: u64,
        percent: u8,
        cap: u64,
    ) -> LedgerResult<()> {
        if name == MAIN_WALLET {
            return Err(LedgerError::InvalidArgument(
                "The main wallet cannot be edited".into(),
            ));
        }
        let index = self.require(name)?;
        let new_name = validate_name(new_name)?;
        if new_name != name && self.contains(new_name) {
            return Err(LedgerError::wallet_exists(new_name));
        }
        validate_percent(percent)?;
        self.ensure_room(balance.saturating_sub(self.wallets[index].balance))?;

        let wallet = &mut self.wallets[index];
        wallet.name = new_name.to_string();
        wallet.balance = balance;
        wallet.percent = percent;
        wallet.cap = cap;
        self.sweep_excess(index);

        info!(wallet = name, new_name, balance, percent, cap, "edited wallet");
        Ok(())
    }

    /// Fold wallet `b` into wallet `a`
    ///
    /// `a` gains `b`'s percent and cap (an unlimited `a` stays unlimited) and
    /// then `b`'s whole balance, after which `b` is removed.
    ///
    /// An unlimited `b` adds nothing to a capped `a`: the merged wallet keeps `a.cap`.
    pub fn merge(&mut self, a: &str, b: &str) -> LedgerResult<()> {
        if a == b {
            return Err(LedgerError::InvalidArgument(format!(
                "Cannot merge wallet '{}' into itself",
                a
            )));
        }
        if b == MAIN_WALLET {
            return Err(LedgerError::InvalidArgument(
                "The main wallet cannot be merged away".into(),
            ));
        }
        let into = self.require(a)?;
        let from = self.require(b)?;

        let percent = self.wallets[into]
            .percent
            .checked_add(self.wallets[from].percent)
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                LedgerError::InvalidArgument(format!(
                    "Merged percent of '{}' and '{}' would exceed 100",
                    a, b
                ))
            })?;
        let cap = match self.wallets[into].cap {
            0 => 0,
            cap => cap.checked_add(self.wallets[from].cap).ok_or_else(|| {
                LedgerError::InvalidArgument(format!(
                    "Merged cap of '{}' and '{}' is too large",
                    a, b
                ))
            })?,
        };

        self.wallets[into].percent = percent;
        self.wallets[into].cap = cap;
        self.sweep_excess(into);

        let moved = self.transfer(b, a, None)?;
        let from = self.require(b)?;
        self.wallets.remove(from);

        info!(into = a, from = b, moved, percent, cap, "merged wallets");
        Ok(())
    }

    /// Zero one wallet's balance, percent, and cap
    ///
    /// Returns `false` if no such wallet exists.
    pub fn clear(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.wallets[index].clear();
                info!(wallet = name, "cleared wallet");
                true
            }
            None => false,
        }
    }

    /// Zero balance, percent, and cap of every wallet
    pub fn clear_all(&mut self) {
        self.wallets.iter_mut().for_each(Wallet::clear);
        info!(count = self.wallets.len(), "cleared all wallets");
    }

    /// Remove every wallet, `main` included
    pub fn wipe(&mut self) {
        let count = self.wallets.len();
        self.wallets.clear();
        info!(count, "wiped all wallets");
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("wallets", &self.wallets)
            .field("queue", &self.queue)
            .field("reserved", &self.reserved)
            .field("default_description", &self.default_description)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ledger: [{}]", self.names().join(", "))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Wallet;
    type IntoIter = std::slice::Iter<'a, Wallet>;

    fn into_iter(self) -> Self::IntoIter {
        self.wallets.iter()
    }
}

fn validate_name(name: &str) -> LedgerResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidArgument(
            "Wallet name cannot be empty".into(),
        ));
    }
    Ok(name)
}

fn validate_percent(percent: u8) -> LedgerResult<()> {
    if percent > 100 {
        return Err(LedgerError::InvalidArgument(format!(
            "Percent must be between 0 and 100, got {}",
            percent
        )));
    }
    Ok(())
}

/// Wallets used throughout the ledger tests:
/// `main(1500, 70%)`, `emergencies(500, 20%, cap 50000)`, `charity(200, 10%)`
#[cfg(test)]
pub(crate) fn sample_ledger() -> Ledger {
    use crate::time::FixedClock;
    use chrono::NaiveDate;

    let instant = NaiveDate::from_ymd_opt(1995, 6, 12)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    Ledger::from_wallets(vec![
        Wallet::with_values(MAIN_WALLET, 1500, 70, 0),
        Wallet::with_values("emergencies", 500, 20, 50000),
        Wallet::with_values("charity", 200, 10, 0),
    ])
    .with_clock(Arc::new(FixedClock(instant)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn balance(ledger: &Ledger, name: &str) -> u64 {
        ledger.get_wallet(name).unwrap().balance
    }

    #[test]
    fn test_get_wallet() {
        let ledger = sample_ledger();
        assert_eq!(ledger.get_wallet("main").unwrap().name, "main");
        assert_eq!(ledger.get_wallet("charity").unwrap().percent, 10);
        assert!(ledger.get_wallet("travels").is_none());
    }

    #[test]
    fn test_add_wallet() {
        let mut ledger = sample_ledger();
        let wallet = ledger.add_wallet("home", 150, 5, 2000).unwrap();
        assert_eq!(wallet, &Wallet::with_values("home", 150, 5, 2000));
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.names(), vec!["main", "emergencies", "charity", "home"]);
    }

    #[test]
    fn test_add_wallet_not_repeated() {
        let mut ledger = sample_ledger();
        ledger.add_wallet("home", 150, 5, 2000).unwrap();

        let err = ledger.add_wallet("home", 0, 0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(
            ledger.get_wallet("home"),
            Some(&Wallet::with_values("home", 150, 5, 2000))
        );
    }

    #[test]
    fn test_add_wallet_invalid_arguments() {
        let mut ledger = sample_ledger();

        assert!(ledger.add_wallet("  ", 0, 0, 0).is_err());
        assert!(ledger.add_wallet("test", 0, 101, 0).is_err());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_add_wallet_fails_balance_above_cap() {
        let mut ledger = sample_ledger();
        let err = ledger.add_wallet("test", 2000, 40, 1000).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(ledger.get_wallet("test").is_none());
    }

    #[test]
    fn test_add_wallet_rejects_total_overflow() {
        let mut ledger = sample_ledger();
        assert!(ledger.add_wallet("huge", u64::MAX, 0, 0).is_err());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_delete_wallet() {
        let mut ledger = sample_ledger();
        assert_eq!(ledger.delete_wallet("charity").unwrap(), 200);
        assert_eq!(ledger.len(), 2);
        assert_eq!(balance(&ledger, "main"), 1700);
    }

    #[test]
    fn test_delete_wallet_doesnt_exist() {
        let mut ledger = sample_ledger();
        assert!(ledger.delete_wallet("test").unwrap_err().is_not_found());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_cant_delete_main() {
        let mut ledger = sample_ledger();
        let err = ledger.delete_wallet("main").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(ledger.len(), 3);
        assert_eq!(balance(&ledger, "main"), 1500);
    }

    #[test]
    fn test_delete_wallet_without_main() {
        let mut ledger = Ledger::from_wallets(vec![Wallet::with_values("charity", 200, 0, 0)]);
        assert!(ledger.delete_wallet("charity").unwrap_err().is_not_found());
        assert_eq!(balance(&ledger, "charity"), 200);
    }

    #[test]
    fn test_rename_valid_wallet() {
        let mut ledger = sample_ledger();
        ledger.rename("charity", "givings").unwrap();
        assert_eq!(ledger.len(), 3);
        assert!(ledger.get_wallet("charity").is_none());
        assert_eq!(balance(&ledger, "givings"), 200);
        assert_eq!(ledger.names()[2], "givings");
    }

    #[test]
    fn test_rename_invalid() {
        let mut ledger = sample_ledger();

        assert!(ledger.rename("main", "principal").is_err());
        assert!(ledger.rename("charity", "emergencies").is_err());
        assert!(ledger.rename("test", "unit").unwrap_err().is_not_found());
        assert_eq!(ledger.names(), vec!["main", "emergencies", "charity"]);
    }

    #[test]
    fn test_valid_edit() {
        let mut ledger = sample_ledger();
        ledger.edit("charity", "givings", 500, 50, 1000).unwrap();
        assert_eq!(
            ledger.get_wallet("givings"),
            Some(&Wallet::with_values("givings", 500, 50, 1000))
        );
    }

    #[test]
    fn test_edit_can_keep_name() {
        let mut ledger = sample_ledger();
        ledger.edit("charity", "charity", 500, 50, 1000).unwrap();
        assert_eq!(
            ledger.get_wallet("charity"),
            Some(&Wallet::with_values("charity", 500, 50, 1000))
        );
    }

    #[test]
    fn test_edit_rejections_leave_state() {
        let mut ledger = sample_ledger();

        assert!(ledger.edit("main", "principal", 500, 50, 1000).is_err());
        assert!(ledger.edit("charity", "emergencies", 500, 50, 1000).is_err());
        assert!(ledger.edit("test", "testing", 10, 10, 10).is_err());
        assert!(ledger.edit("charity", "charity", 10, 120, 0).is_err());

        assert_eq!(
            ledger.get_wallet("main"),
            Some(&Wallet::with_values("main", 1500, 70, 0))
        );
        assert_eq!(
            ledger.get_wallet("charity"),
            Some(&Wallet::with_values("charity", 200, 10, 0))
        );
    }

    #[test]
    fn test_edit_above_cap_sweeps_to_main() {
        let mut ledger = sample_ledger();
        ledger.edit("charity", "charity", 500, 10, 300).unwrap();
        assert_eq!(
            ledger.get_wallet("charity"),
            Some(&Wallet::with_values("charity", 300, 0, 300))
        );
        assert_eq!(balance(&ledger, "main"), 1700);
    }

    #[test]
    fn test_merge_wallets() {
        let mut ledger = sample_ledger();
        ledger.merge("emergencies", "charity").unwrap();

        assert_eq!(ledger.len(), 2);
        assert!(ledger.get_wallet("charity").is_none());
        assert_eq!(
            ledger.get_wallet("emergencies"),
            Some(&Wallet::with_values("emergencies", 700, 30, 50000))
        );
        assert_eq!(
            ledger.get_wallet("main"),
            Some(&Wallet::with_values("main", 1500, 70, 0))
        );
    }

    #[test]
    fn test_merge_into_capped_wallet_sweeps_excess() {
        let mut ledger = Ledger::from_wallets(vec![
            Wallet::with_values("main", 0, 50, 0),
            Wallet::with_values("travels", 80, 20, 100),
            Wallet::with_values("gifts", 90, 30, 50),
        ]);
        ledger.merge("travels", "gifts").unwrap();

        assert_eq!(
            ledger.get_wallet("travels"),
            Some(&Wallet::with_values("travels", 150, 0, 150))
        );
        assert_eq!(balance(&ledger, "main"), 20);
        assert_eq!(ledger.total(), 170);
    }

    #[test]
    fn test_merge_wallets_fail() {
        let mut ledger = sample_ledger();

        assert!(ledger.merge("emergencies", "test").unwrap_err().is_not_found());
        assert!(ledger.merge("charity", "charity").is_err());
        assert!(ledger.merge("charity", "main").is_err());

        assert_eq!(ledger.len(), 3);
        assert_eq!(
            ledger.get_wallet("emergencies"),
            Some(&Wallet::with_values("emergencies", 500, 20, 50000))
        );
    }

    #[test]
    fn test_clear_wallet() {
        let mut ledger = sample_ledger();
        assert!(ledger.clear("emergencies"));
        assert!(!ledger.clear("unknown"));
        assert_eq!(
            ledger.get_wallet("emergencies"),
            Some(&Wallet::new("emergencies"))
        );
    }

    #[test]
    fn test_clear_all() {
        let mut ledger = sample_ledger();
        ledger.clear_all();
        assert_eq!(ledger.len(), 3);
        assert!(ledger.iter().all(|w| w.balance == 0 && w.percent == 0 && w.cap == 0));
    }

    #[test]
    fn test_wipe() {
        let mut ledger = sample_ledger();
        ledger.wipe();
        assert!(ledger.is_empty());
        assert!(ledger.deposit(100).is_err());

        ledger.add_wallet("main", 0, 100, 0).unwrap();
        ledger.deposit(100).unwrap();
        assert_eq!(balance(&ledger, "main"), 100);
    }

    #[test]
    fn test_display() {
        let ledger = sample_ledger();
        assert_eq!(
            ledger.to_string(),
            "Ledger: [main, emergencies, charity]"
        );
    }
}
