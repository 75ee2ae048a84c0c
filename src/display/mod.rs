//! Display formatting for terminal output

pub mod history;
pub mod wallet;

pub use history::{format_history_report, format_transaction_row};
pub use wallet::{format_distribution, format_totals, format_wallet_list};

/// Format an amount with the configured currency symbol
pub fn format_amount(amount: u64, currency: &str) -> String {
    format!("{}{}", currency, amount)
}
