//! Audit-log display formatting

use super::format_amount;
use crate::history::HistoryReport;
use crate::models::{Transaction, DATE_FORMAT};

/// Format one audit-log entry as a register row
pub fn format_transaction_row(txn: &Transaction, currency: &str) -> String {
    format!(
        "{}  {:<16} {:>10}  {}",
        txn.date.format(DATE_FORMAT),
        txn.wallet,
        format_amount(txn.amount, currency),
        txn.description
    )
}

/// Format a query's matches followed by per-wallet totals
pub fn format_history_report(report: &HistoryReport<'_>, currency: &str) -> String {
    if report.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<19}  {:<16} {:>10}  {}\n",
        "Date", "Wallet", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for txn in &report.matches {
        output.push_str(&format_transaction_row(txn, currency));
        output.push('\n');
    }

    output.push('\n');
    for (wallet, summary) in &report.per_wallet {
        output.push_str(&format!(
            "{}: {} ({} transactions)\n",
            wallet,
            format_amount(summary.total, currency),
            summary.count
        ));
    }
    output.push_str(&format!(
        "Total transaction amount: {}\n",
        format_amount(report.total, currency)
    ));
    output.push_str(&format!("Number of transactions: {}\n", report.count));

    output
}
