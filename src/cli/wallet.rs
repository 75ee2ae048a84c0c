//! Wallet CLI commands
//!
//! Commands that create, reshape, or remove wallets.

use clap::Subcommand;

use crate::display::format_wallet_list;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

/// Wallet management subcommands
#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// List all wallets with totals
    #[command(alias = "ls")]
    List,

    /// Create a new wallet
    Add {
        /// Wallet name
        name: String,
        /// Starting balance
        #[arg(short, long, default_value_t = 0)]
        balance: u64,
        /// Share of future deposits (0-100)
        #[arg(short, long, default_value_t = 0)]
        percent: u8,
        /// Maximum balance, 0 for unlimited
        #[arg(short, long, default_value_t = 0)]
        cap: u64,
    },

    /// Delete a wallet, moving its balance to main
    #[command(alias = "rm")]
    Delete {
        /// Wallet name
        name: String,
    },

    /// Rename a wallet
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Replace a wallet's fields; omitted fields keep their current value
    Edit {
        /// Wallet name
        name: String,
        /// New name
        #[arg(short = 'n', long = "rename")]
        new_name: Option<String>,
        /// New balance
        #[arg(short, long)]
        balance: Option<u64>,
        /// New percent
        #[arg(short, long)]
        percent: Option<u8>,
        /// New cap
        #[arg(short, long)]
        cap: Option<u64>,
    },

    /// Fold the second wallet into the first
    Merge {
        /// Wallet that remains
        into: String,
        /// Wallet that is merged away
        from: String,
    },

    /// Set a wallet's cap, moving any excess to main
    Cap {
        /// Wallet name
        name: String,
        /// Maximum balance, 0 for unlimited
        cap: u64,
    },

    /// Set deposit percents; main takes whatever is left
    Percents {
        /// Assignments such as `emergencies=20`
        #[arg(required = true, value_parser = parse_percent_pair)]
        percents: Vec<(String, u8)>,
    },

    /// Zero balance, percent, and cap of one wallet or all of them
    Clear {
        /// Wallet name
        #[arg(required_unless_present = "all")]
        name: Option<String>,
        /// Clear every wallet
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },

    /// Remove every wallet, main included
    Wipe {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(storage: &Storage, cmd: WalletCommands) -> LedgerResult<()> {
    let mut ledger = storage.open()?;
    let currency = storage.settings().currency_symbol.as_str();

    match cmd {
        WalletCommands::List => {
            print!("{}", format_wallet_list(&ledger, currency));
            return Ok(());
        }

        WalletCommands::Add {
            name,
            balance,
            percent,
            cap,
        } => {
            let wallet = ledger.add_wallet(&name, balance, percent, cap)?;
            println!("Created wallet: {}", wallet);
        }

        WalletCommands::Delete { name } => {
            let moved = ledger.delete_wallet(&name)?;
            println!("Deleted wallet: {} ({}{} moved to main)", name, currency, moved);
        }

        WalletCommands::Rename { old, new } => {
            ledger.rename(&old, &new)?;
            println!("Renamed wallet: {} -> {}", old, new.trim());
        }

        WalletCommands::Edit {
            name,
            new_name,
            balance,
            percent,
            cap,
        } => {
            let current = ledger
                .get_wallet(&name)
                .cloned()
                .ok_or_else(|| LedgerError::wallet_not_found(&name))?;

            let new_name = new_name.unwrap_or_else(|| current.name.clone());
            ledger.edit(
                &name,
                &new_name,
                balance.unwrap_or(current.balance),
                percent.unwrap_or(current.percent),
                cap.unwrap_or(current.cap),
            )?;

            if let Some(wallet) = ledger.get_wallet(new_name.trim()) {
                println!("Updated wallet: {}", wallet);
            }
        }

        WalletCommands::Merge { into, from } => {
            ledger.merge(&into, &from)?;
            if let Some(wallet) = ledger.get_wallet(&into) {
                println!("Merged {} into {}", from, wallet);
            }
        }

        WalletCommands::Cap { name, cap } => {
            let swept = ledger.set_cap(&name, cap)?;
            println!("Set cap of {} to {}{}", name, currency, cap);
            if swept > 0 {
                println!("  {}{} over the cap moved to main", currency, swept);
            }
        }

        WalletCommands::Percents { percents } => {
            let pairs: Vec<(&str, u8)> = percents.iter().map(|(n, p)| (n.as_str(), *p)).collect();
            ledger.calc_percents(&pairs)?;
            for wallet in &ledger {
                println!("  {:<16} {:>3}%", wallet.name, wallet.percent);
            }
            if !ledger.correct_percent() {
                println!(
                    "Warning: percents sum to {}%, deposits need exactly 100%",
                    ledger.percent_sum()
                );
            }
        }

        WalletCommands::Clear { name, all } => match name {
            Some(name) if !all => {
                if !ledger.clear(&name) {
                    return Err(LedgerError::wallet_not_found(name));
                }
                println!("Cleared wallet: {}", name);
            }
            _ => {
                ledger.clear_all();
                println!("Cleared all {} wallets", ledger.len());
            }
        },

        WalletCommands::Wipe { yes } => {
            if !yes {
                println!("This removes every wallet, main included. Re-run with --yes to confirm.");
                return Ok(());
            }
            ledger.wipe();
            println!("Removed all wallets. Add a main wallet before depositing.");
        }
    }

    storage.save(&mut ledger)?;
    Ok(())
}

/// Parse a `name=percent` assignment
pub fn parse_percent_pair(s: &str) -> Result<(String, u8), String> {
    let (name, percent) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PERCENT, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing wallet name in '{}'", s));
    }
    let percent = percent
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid percent in '{}': {}", s, e))?;
    Ok((name.to_string(), percent))
}
