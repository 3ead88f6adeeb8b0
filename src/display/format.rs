//! Amount and date formatting
//!
//! Sign rules: income figures show `+`, expense figures show `-`, zero is
//! unsigned. The balance drops the `+` but keeps a `-` when negative.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::models::{Money, Transaction, DATE_FORMAT};

/// Insert thousands separators into a non-negative integer
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Magnitude with symbol and separators, e.g. `$1,234.50`
pub fn format_magnitude(amount: Money, symbol: &str) -> String {
    format!(
        "{}{}.{:02}",
        symbol,
        group_thousands(amount.dollars()),
        amount.cents_part()
    )
}

/// Always-signed amount; zero is shown without a sign
pub fn format_signed(amount: Money, symbol: &str) -> String {
    let magnitude = format_magnitude(amount.abs(), symbol);
    if amount.is_zero() {
        magnitude
    } else if amount.is_negative() {
        format!("-{}", magnitude)
    } else {
        format!("+{}", magnitude)
    }
}

/// A transaction's amount with the sign implied by its kind
pub fn format_transaction_amount(txn: &Transaction, symbol: &str) -> String {
    format_signed(txn.signed_amount(), symbol)
}

pub fn format_income(total: Money, symbol: &str) -> String {
    format_signed(total, symbol)
}

/// Expense totals are magnitudes; they are shown negative
pub fn format_expense(total: Money, symbol: &str) -> String {
    format_signed(-total, symbol)
}

/// Balance: `-` when negative, no sign otherwise
pub fn format_balance(balance: Money, symbol: &str) -> String {
    let signed = format_signed(balance, symbol);
    match signed.strip_prefix('+') {
        Some(unsigned) => unsigned.to_string(),
        None => signed,
    }
}

/// Format a date with a user-supplied strftime pattern
///
/// Falls back to `YYYY-MM-DD` if the pattern is invalid or asks for fields a
/// plain date does not have (`%H`, `%M`, `%z`, ...).
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format(DATE_FORMAT).to_string();
    }
    out
}
