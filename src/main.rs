use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use wallet_ledger::cli::{
    handle_funds_command, handle_history_command, handle_wallet_command, FundsCommands,
    HistoryArgs, WalletCommands,
};
use wallet_ledger::config::{paths::DATA_DIR_ENV, LedgerPaths};
use wallet_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "wallet",
    version,
    about = "Personal multi-wallet money ledger",
    long_about = "Split your money across named wallets. Deposits are distributed by \
                  each wallet's percent, capped wallets spill their excess into main, \
                  and every deduction is recorded in an append-only audit log."
)]
struct Cli {
    /// Directory holding wallets.json, transactions.csv and config.json
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Wallet(WalletCommands),

    #[command(flatten)]
    Funds(FundsCommands),

    /// Query the audit log
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    wallet_ledger::logging::init(cli.verbose);

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let storage = Storage::new(paths)?;

    match cli.command {
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&storage, cmd)?,
        Some(Commands::Funds(cmd)) => handle_funds_command(&storage, cmd)?,
        Some(Commands::History(args)) => handle_history_command(&storage, &args)?,
        Some(Commands::Config) => {
            let paths = storage.paths();
            let settings = storage.settings();
            println!("Wallet Ledger Configuration");
            println!("===========================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Snapshot:       {}", paths.snapshot_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Reserved wallets:    {}", settings.reserved_wallets.join(", "));
            println!("  Default description: {}", settings.default_description);
        }
        None => {
            println!("Wallet Ledger - personal multi-wallet money ledger");
            println!();
            println!("Run 'wallet --help' for usage information.");
            println!("Run 'wallet list' to see your wallets.");
        }
    }

    Ok(())
}
