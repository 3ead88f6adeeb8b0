//! Transaction display formatting
//!
//! Register rows, the register table and the totals block for terminal output.

use crate::config::Settings;
use crate::models::Transaction;
use crate::reports::Totals;

use super::format::{
    format_balance, format_date, format_expense, format_income, format_transaction_amount,
};
use super::list::ListView;

const NAME_WIDTH: usize = 24;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    format!(
        "{:8}  {:10}  {:width$}  {:>14}",
        txn.id.short(),
        format_date(txn.date, &settings.date_format),
        truncate(&txn.name, NAME_WIDTH),
        format_transaction_amount(txn, &settings.currency_symbol),
        width = NAME_WIDTH
    )
}

/// Render every transaction into a fresh list view
pub fn render_list(transactions: &[Transaction], settings: &Settings) -> ListView {
    let mut view = ListView::new();
    view.render_all(
        transactions
            .iter()
            .map(|txn| format_transaction_row(txn, settings)),
    );
    view
}

/// Format a list view as a register with a header
pub fn format_register(view: &ListView) -> String {
    if view.is_empty() {
        return "No transactions yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8}  {:10}  {:width$}  {:>14}\n",
        "ID",
        "Date",
        "Name",
        "Amount",
        width = NAME_WIDTH
    ));
    output.push_str(&"-".repeat(8 + 2 + 10 + 2 + NAME_WIDTH + 2 + 14));
    output.push('\n');

    for row in view.rows() {
        output.push_str(row);
        output.push('\n');
    }

    output
}

/// Format the balance, income and expense figures
pub fn format_totals(totals: &Totals, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    format!(
        "Balance: {}\nIncome:  {}\nExpense: {}\n",
        format_balance(totals.balance, symbol),
        format_income(totals.income, symbol),
        format_expense(totals.expense, symbol)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("ID:     {}\n", txn.id));
    output.push_str(&format!("Name:   {}\n", txn.name));
    output.push_str(&format!(
        "Date:   {}\n",
        format_date(txn.date, &settings.date_format)
    ));
    output.push_str(&format!(
        "Amount: {}\n",
        format_transaction_amount(txn, &settings.currency_symbol)
    ));
    output.push_str(&format!("Type:   {}\n", txn.kind));

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}
