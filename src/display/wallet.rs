//! Wallet display formatting

use tabled::{settings::Style, Table, Tabled};

use super::format_amount;
use crate::ledger::{Distribution, Ledger};
use crate::models::Wallet;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Percent")]
    percent: String,
    #[tabled(rename = "Cap")]
    cap: String,
}

impl WalletRow {
    fn new(wallet: &Wallet, currency: &str) -> Self {
        Self {
            name: wallet.name.clone(),
            balance: format_amount(wallet.balance, currency),
            percent: format!("{}%", wallet.percent),
            cap: if wallet.is_capped() {
                format_amount(wallet.cap, currency)
            } else {
                "-".to_string()
            },
        }
    }
}

/// Format every wallet as a table followed by the ledger totals
pub fn format_wallet_list(ledger: &Ledger, currency: &str) -> String {
    if ledger.is_empty() {
        return "No wallets found.\n".to_string();
    }

    let rows: Vec<WalletRow> = ledger.iter().map(|w| WalletRow::new(w, currency)).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());

    let mut output = table.to_string();
    output.push_str("\n\n");
    output.push_str(&format_totals(ledger, currency));

    if !ledger.correct_percent() {
        output.push_str(&format!(
            "\nWarning: percents sum to {}%, deposits are disabled until they sum to 100%\n",
            ledger.percent_sum()
        ));
    }

    output
}

/// Format total, usable, and non-usable balances
pub fn format_totals(ledger: &Ledger, currency: &str) -> String {
    format!(
        "Total:      {}\nUsable:     {}\nNon-usable: {}\n",
        format_amount(ledger.total(), currency),
        format_amount(ledger.usable(), currency),
        format_amount(ledger.non_usable(), currency)
    )
}

/// Format how a deposit was split
pub fn format_distribution(distribution: &Distribution, currency: &str) -> String {
    let mut output = format!(
        "Deposited {}\n",
        format_amount(distribution.total(), currency)
    );

    for share in &distribution.shares {
        output.push_str(&format!(
            "  {:<16} {:>12}",
            share.wallet,
            format_amount(share.amount, currency)
        ));
        if share.swept > 0 {
            output.push_str(&format!(
                "  ({} over cap moved to main)",
                format_amount(share.swept, currency)
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "  {:<16} {:>12}\n",
        "main",
        format_amount(distribution.to_main, currency)
    ));
    output
}
