//! Transaction CLI commands
//!
//! Thin presentation layer over [`LedgerService`]: parses arguments, asks for
//! delete confirmation, and keeps the printed register in step with the
//! indices the store hands back.

use std::io::{self, Write};

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_register, format_totals, format_transaction_details, format_transaction_row,
    render_list,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::DATE_FORMAT;
use crate::services::LedgerService;
use crate::storage::{FileStore, Storage};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new income or expense
    Add {
        /// What the transaction was for
        name: String,
        /// Amount as a positive number (e.g. "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Record as an expense instead of income
        #[arg(short, long)]
        expense: bool,
    },
    /// List all transactions, newest first, with totals
    #[command(alias = "ls")]
    List,
    /// Show income, expense and balance
    Totals,
    /// Show transaction details
    Show {
        /// Transaction ID or unique ID prefix
        id: String,
    },
    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID or unique ID prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let mut service = storage.service(settings);

    match cmd {
        TransactionCommands::Add {
            name,
            amount,
            date,
            expense,
        } => {
            let date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format(DATE_FORMAT)
                    .to_string()
            });

            let mut view = render_list(service.transactions(), settings);
            let inserted = service.submit_form(&name, &amount, &date, expense)?;
            view.on_added(
                &inserted,
                format_transaction_row(&inserted.transaction, settings),
            )?;
            warn_on_audit_failure(&mut service);

            println!("Added transaction:");
            print!(
                "{}",
                format_transaction_details(&inserted.transaction, settings)
            );
            println!();
            print!("{}", format_register(&view));
            println!();
            print!("{}", format_totals(&service.totals()?, settings));
        }

        TransactionCommands::List => {
            let view = render_list(service.transactions(), settings);
            print!("{}", format_register(&view));
            println!();
            print!("{}", format_totals(&service.totals()?, settings));
        }

        TransactionCommands::Totals => {
            print!("{}", format_totals(&service.totals()?, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(txn, settings));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .find(&id)?
                .cloned()
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;

            if settings.confirm_deletes && !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, settings));
                if !confirm("Delete transaction? (yes/no): ")? {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let mut view = render_list(service.transactions(), settings);
            let removed = service.request_delete(txn.id.as_str())?;
            view.on_removed(&removed)?;
            warn_on_audit_failure(&mut service);

            println!(
                "Deleted transaction: {} ({} {})",
                removed.transaction.id, removed.transaction.date, removed.transaction.name
            );
            println!();
            print!("{}", format_register(&view));
            println!();
            print!("{}", format_totals(&service.totals()?, settings));
        }
    }

    Ok(())
}

fn warn_on_audit_failure(service: &mut LedgerService<'_, FileStore>) {
    if let Some(e) = service.take_audit_error() {
        eprintln!("warning: change saved but not recorded in the audit log: {}", e);
    }
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no
fn confirm(prompt: &str) -> LedgerResult<bool> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| LedgerError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| LedgerError::Io(e.to_string()))?;

    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
