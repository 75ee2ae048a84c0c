//! Audit-log query command

use clap::Args;

use crate::display::format_history_report;
use crate::error::LedgerResult;
use crate::history::QueryFilter;
use crate::models::parse_day;
use crate::storage::Storage;

/// Filters for the history command
#[derive(Args, Debug, Default)]
pub struct HistoryArgs {
    /// First day to include (dd-mm-yyyy)
    #[arg(short, long)]
    pub from: Option<String>,
    /// Last day to include (dd-mm-yyyy); today if omitted
    #[arg(short, long)]
    pub to: Option<String>,
    /// Only show this wallet
    #[arg(short, long)]
    pub wallet: Option<String>,
}

impl HistoryArgs {
    /// Turn the raw arguments into a query filter
    pub fn to_filter(&self) -> LedgerResult<QueryFilter> {
        let mut filter = QueryFilter::new();
        if let Some(from) = &self.from {
            filter = filter.from_day(parse_day(from)?);
        }
        if let Some(to) = &self.to {
            filter = filter.to_day(parse_day(to)?);
        }
        if let Some(wallet) = &self.wallet {
            filter = filter.wallet(wallet.as_str());
        }
        Ok(filter)
    }
}

/// Handle the history command
pub fn handle_history_command(storage: &Storage, args: &HistoryArgs) -> LedgerResult<()> {
    let filter = args.to_filter()?;

    let mut history = storage.history();
    history.load()?;

    let report = history.query_report(&filter);
    print!(
        "{}",
        format_history_report(&report, &storage.settings().currency_symbol)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    #[test]
    fn test_to_filter() {
        let args = HistoryArgs {
            from: Some("01-06-2023".into()),
            to: Some("30-06-2023".into()),
            wallet: Some("main".into()),
        };
        let filter = args.to_filter().unwrap();

        assert_eq!(filter.from, Some(parse_date("01-06-2023 00:00:00").unwrap()));
        assert_eq!(filter.to, Some(parse_date("30-06-2023 23:59:59").unwrap()));
        assert_eq!(filter.wallet.as_deref(), Some("main"));
    }

    #[test]
    fn test_to_filter_rejects_bad_day() {
        let args = HistoryArgs {
            from: Some("2023-06-01".into()),
            ..Default::default()
        };
        assert!(args.to_filter().is_err());
    }
}
