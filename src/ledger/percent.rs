//! Deposit percentages
//!
//! Deposits require the percents of all wallets to sum to exactly 100.
//! `main` takes whatever share the given wallets leave over when the
//! percents are recalculated.

use std::collections::HashSet;

use tracing::info;

use super::{validate_percent, Ledger};
use crate::error::{LedgerError, LedgerResult};
use crate::models::MAIN_WALLET;

impl Ledger {
    /// True iff the ledger has wallets and their percents sum to exactly 100
    pub fn correct_percent(&self) -> bool {
        !self.wallets.is_empty() && self.percent_sum() == 100
    }

    /// Sum of every wallet's percent
    pub fn percent_sum(&self) -> u32 {
        self.wallets.iter().map(|w| u32::from(w.percent)).sum()
    }

    /// Apply new percents to the named wallets and derive `main`'s
    ///
    /// `main` ends up with `100 - sum(given non-main percents)`; wallets not
    /// named keep their percent and are not counted, so the result need not
    /// satisfy [`correct_percent`](Self::correct_percent). A value given for
    /// `main` itself is ignored. Fails, leaving every wallet untouched, if a
    /// name is unknown or repeated, or if the given percents add up to more
    /// than 100.
    pub fn calc_percents(&mut self, percents: &[(&str, u8)]) -> LedgerResult<()> {
        let main_index = self.require_main()?;

        let mut seen = HashSet::new();
        let mut updates = Vec::with_capacity(percents.len());
        for &(name, percent) in percents {
            if !seen.insert(name) {
                return Err(LedgerError::InvalidArgument(format!(
                    "Wallet '{}' given more than once",
                    name
                )));
            }
            validate_percent(percent)?;
            let index = self.require(name)?;
            if index != main_index {
                updates.push((index, percent));
            }
        }

        let given: u32 = updates.iter().map(|&(_, p)| u32::from(p)).sum();
        let main_percent = 100u32
            .checked_sub(given)
            .and_then(|p| u8::try_from(p).ok())
            .ok_or_else(|| {
                LedgerError::InvalidArgument(format!(
                    "Given percents sum to {}, above 100",
                    given
                ))
            })?;

        for (index, percent) in updates {
            self.wallets[index].percent = percent;
        }
        self.wallets[main_index].percent = main_percent;

        info!(main = main_percent, wallets = percents.len(), "recalculated percents");
        Ok(())
    }
}
