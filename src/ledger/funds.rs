//! Money movements between wallets
//!
//! Every operation that increases a wallet's balance runs cap correction on
//! that wallet immediately afterwards, so no wallet is ever observed above
//! its cap. `main` is the sink for swept excess and is never capped itself.

use tracing::{debug, info};

use super::Ledger;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, Wallet, MAIN_WALLET};

/// One wallet's part of a deposit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub wallet: String,
    /// `floor(amount * percent / 100)`
    pub amount: u64,
    /// Portion of `amount` swept on to `main` by the wallet's cap
    pub swept: u64,
}

/// How a deposit was split across the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    pub shares: Vec<Share>,
    /// Rounding remainder and the share of `main` itself
    pub to_main: u64,
}

impl Distribution {
    /// Sum of every share plus the remainder; always the deposited amount
    pub fn total(&self) -> u64 {
        self.shares.iter().map(|s| s.amount).sum::<u64>() + self.to_main
    }
}

impl Ledger {
    /// Move money between two wallets
    ///
    /// With `amount` omitted the whole balance of `from` moves. The receiving
    /// wallet is cap-corrected afterwards. Returns the amount moved.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Option<u64>) -> LedgerResult<u64> {
        if from == to {
            return Err(LedgerError::InvalidArgument(format!(
                "Cannot transfer from wallet '{}' to itself",
                from
            )));
        }
        let from_index = self.require(from)?;
        let to_index = self.require(to)?;

        let available = self.wallets[from_index].balance;
        let amount = match amount {
            Some(amount) if amount > available => {
                return Err(LedgerError::InsufficientFunds {
                    wallet: from.to_string(),
                    needed: amount,
                    available,
                });
            }
            Some(amount) => amount,
            None => available,
        };
        if self.wallets[to_index].balance.checked_add(amount).is_none() {
            return Err(LedgerError::InvalidArgument(format!(
                "Transfer of {} would overflow wallet '{}'",
                amount, to
            )));
        }

        self.wallets[from_index].debit(amount);
        self.wallets[to_index].credit(amount);
        let swept = self.sweep_excess(to_index);

        info!(from, to, amount, swept, "transferred funds");
        Ok(amount)
    }

    /// Take money out of a wallet and queue an audit record for it
    ///
    /// With `amount` omitted the whole balance is deducted. A wallet with a
    /// zero balance, or a zero amount, is a no-op that queues nothing and
    /// returns `None`.
    pub fn deduct(
        &mut self,
        name: &str,
        description: Option<&str>,
        amount: Option<u64>,
    ) -> LedgerResult<Option<Transaction>> {
        let index = self.require(name)?;
        let before = self.wallets[index].balance;
        if before == 0 {
            debug!(wallet = name, "nothing to deduct from empty wallet");
            return Ok(None);
        }

        let amount = match amount {
            Some(amount) if amount > before => {
                return Err(LedgerError::InsufficientFunds {
                    wallet: name.to_string(),
                    needed: amount,
                    available: before,
                });
            }
            Some(amount) => amount,
            None => before,
        };
        if amount == 0 {
            return Ok(None);
        }

        let description = description
            .map(str::to_string)
            .unwrap_or_else(|| self.default_description.clone());
        let after = self.wallets[index].debit(amount).balance;

        let transaction = Transaction::deduction(self.clock.now(), name, description, before, after);
        self.queue.queue(transaction.clone());

        info!(wallet = name, amount, before, after, "deducted funds");
        Ok(Some(transaction))
    }

    /// Put money straight into one wallet, bypassing the percentages
    ///
    /// Returns the wallet's balance after cap correction.
    pub fn add(&mut self, name: &str, amount: u64) -> LedgerResult<u64> {
        let index = self.require(name)?;
        self.ensure_room(amount)?;

        self.wallets[index].credit(amount);
        let swept = self.sweep_excess(index);

        info!(wallet = name, amount, swept, "added funds");
        Ok(self.wallets[index].balance)
    }

    /// Split incoming money across the wallets by their percentages
    ///
    /// Each non-`main` wallet with a percent receives
    /// `floor(amount * percent / 100)` in collection order and is
    /// cap-corrected; whatever is left lands on `main`. Requires the
    /// percentages to sum to exactly 100.
    pub fn deposit(&mut self, amount: u64) -> LedgerResult<Distribution> {
        if !self.correct_percent() {
            return Err(LedgerError::InvariantViolation(format!(
                "Wallet percents must sum to 100 before depositing, currently {}",
                self.percent_sum()
            )));
        }
        let main_index = self.require_main()?;
        self.ensure_room(amount)?;

        let mut distribution = Distribution::default();
        let mut remainder = amount;

        for index in 0..self.wallets.len() {
            let wallet = &mut self.wallets[index];
            if wallet.is_main() || wallet.percent == 0 {
                continue;
            }

            let part = share_of(amount, wallet.percent);
            wallet.credit(part);
            remainder = remainder.saturating_sub(part);
            let name = wallet.name.clone();

            let swept = self.sweep_excess(index);
            debug!(wallet = %name, part, swept, "distributed deposit share");
            distribution.shares.push(Share {
                wallet: name,
                amount: part,
                swept,
            });
        }

        self.wallets[main_index].credit(remainder);
        distribution.to_main = remainder;

        info!(
            amount,
            wallets = distribution.shares.len(),
            to_main = remainder,
            "distributed deposit"
        );
        Ok(distribution)
    }

    /// Sweep any balance above the wallet's cap into `main`
    ///
    /// The corrected wallet's percent drops to 0 so it stops receiving
    /// deposits until reconfigured. A missing `main` is recreated. Returns
    /// the amount swept; calling it again is a no-op.
    pub fn correct_cap(&mut self, name: &str) -> LedgerResult<u64> {
        let index = self.require(name)?;
        Ok(self.sweep_excess(index))
    }

    /// Set a wallet's cap, sweeping any excess to `main` right away
    ///
    /// Returns the amount swept. `main` cannot be capped.
    pub fn set_cap(&mut self, name: &str, cap: u64) -> LedgerResult<u64> {
        if name == MAIN_WALLET {
            return Err(LedgerError::InvalidArgument(
                "The main wallet cannot have a cap".into(),
            ));
        }
        let index = self.require(name)?;

        self.wallets[index].cap = cap;
        let swept = self.sweep_excess(index);

        info!(wallet = name, cap, swept, "set wallet cap");
        Ok(swept)
    }

    pub(super) fn sweep_excess(&mut self, index: usize) -> u64 {
        let wallet = &mut self.wallets[index];
        if wallet.is_main() {
            return 0;
        }
        let excess = wallet.excess();
        if excess == 0 {
            return 0;
        }

        wallet.debit(excess);
        wallet.percent = 0;
        let name = wallet.name.clone();

        let main_index = match self.index_of(MAIN_WALLET) {
            Some(main_index) => main_index,
            None => {
                self.wallets.push(Wallet::new(MAIN_WALLET));
                self.wallets.len() - 1
            }
        };
        self.wallets[main_index].credit(excess);

        debug!(wallet = %name, excess, "swept balance above cap into main");
        excess
    }

    /// Reject money entering the ledger if the total would overflow
    pub(super) fn ensure_room(&self, amount: u64) -> LedgerResult<()> {
        self.wallets
            .iter()
            .try_fold(amount, |total, w| total.checked_add(w.balance))
            .map(|_| ())
            .ok_or_else(|| {
                LedgerError::InvalidArgument(format!(
                    "Adding {} would overflow the ledger total",
                    amount
                ))
            })
    }
}

fn share_of(amount: u64, percent: u8) -> u64 {
    let part = u128::from(amount) * u128::from(percent) / 100;
    u64::try_from(part).unwrap_or(amount)
}
