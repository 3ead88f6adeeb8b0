use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_cli::cli::{handle_history_command, handle_transaction_command, TransactionCommands};
use ledger_cli::config::{paths::LedgerPaths, settings::Settings};
use ledger_cli::storage::{LoadStatus, Storage, TRANSACTIONS_KEY};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Terminal-based personal income and expense ledger",
    long_about = "ledger keeps a local record of your income and expenses, \
                  newest first, and shows the running balance."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Show recent adds and deletes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    if let LoadStatus::Discarded(reason) = storage.ledger.load_status() {
        eprintln!(
            "warning: stored ledger could not be read ({}); starting with an empty ledger",
            reason
        );
    }

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("ledger Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.slot_file(TRANSACTIONS_KEY).display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Confirm deletes: {}", settings.confirm_deletes);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("ledger - personal income and expense ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger add <NAME> <AMOUNT>' to record a transaction.");
        }
    }

    Ok(())
}
