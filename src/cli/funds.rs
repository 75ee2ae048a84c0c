//! Money movement CLI commands

use clap::Subcommand;

use crate::display::{format_amount, format_distribution, format_totals};
use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

/// Subcommands that move money or report balances
#[derive(Subcommand, Debug)]
pub enum FundsCommands {
    /// Split incoming money across wallets by percent
    Deposit {
        /// Amount to deposit
        amount: u64,
    },

    /// Spend money from a wallet and record it in the audit log
    Deduct {
        /// Wallet name
        wallet: String,
        /// Amount to deduct; the whole balance if omitted
        amount: Option<u64>,
        /// What the money was spent on
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Put money straight into one wallet
    Credit {
        /// Wallet name
        wallet: String,
        /// Amount to add
        amount: u64,
    },

    /// Move money between wallets
    Transfer {
        /// Source wallet
        from: String,
        /// Destination wallet
        to: String,
        /// Amount to move; the whole balance if omitted
        amount: Option<u64>,
    },

    /// Show balance totals
    Total {
        /// Only sum these wallets
        #[arg(long, num_args = 1.., conflicts_with = "except")]
        on: Vec<String>,
        /// Sum every wallet except these
        #[arg(long, num_args = 1..)]
        except: Vec<String>,
    },
}

/// Handle a funds command
pub fn handle_funds_command(storage: &Storage, cmd: FundsCommands) -> LedgerResult<()> {
    let mut ledger = storage.open()?;
    let currency = storage.settings().currency_symbol.as_str();

    match cmd {
        FundsCommands::Deposit { amount } => {
            let distribution = ledger.deposit(amount)?;
            print!("{}", format_distribution(&distribution, currency));
        }

        FundsCommands::Deduct {
            wallet,
            amount,
            description,
        } => match ledger.deduct(&wallet, description.as_deref(), amount)? {
            Some(txn) => println!(
                "Deducted {} from {} ({} left)",
                format_amount(txn.amount, currency),
                txn.wallet,
                format_amount(txn.balance_after, currency)
            ),
            None => {
                println!("Nothing to deduct from {}", wallet);
                return Ok(());
            }
        },

        FundsCommands::Credit { wallet, amount } => {
            let balance = ledger.add(&wallet, amount)?;
            println!(
                "Added {} to {} (balance {})",
                format_amount(amount, currency),
                wallet,
                format_amount(balance, currency)
            );
        }

        FundsCommands::Transfer { from, to, amount } => {
            let moved = ledger.transfer(&from, &to, amount)?;
            println!(
                "Transferred {} from {} to {}",
                format_amount(moved, currency),
                from,
                to
            );
        }

        FundsCommands::Total { on, except } => {
            if !on.is_empty() {
                let total = ledger
                    .total_on(&on)
                    .ok_or_else(|| unknown_among(&ledger, &on))?;
                println!("Total on {}: {}", on.join(", "), format_amount(total, currency));
            } else if !except.is_empty() {
                let total = ledger
                    .total_except(&except)
                    .ok_or_else(|| unknown_among(&ledger, &except))?;
                println!(
                    "Total except {}: {}",
                    except.join(", "),
                    format_amount(total, currency)
                );
            } else {
                print!("{}", format_totals(&ledger, currency));
            }
            return Ok(());
        }
    }

    storage.save(&mut ledger)?;
    Ok(())
}

fn unknown_among(ledger: &crate::ledger::Ledger, names: &[String]) -> LedgerError {
    let unknown: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| !ledger.contains(name))
        .collect();
    LedgerError::wallet_not_found(unknown.join(", "))
}
