//! Transaction model
//!
//! A transaction is one income or expense entry. Amounts are always stored as
//! a positive magnitude; the sign comes from [`TransactionKind`].

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Date format accepted from user input and written to disk
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction adds to or takes from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn from_expense_flag(is_expense: bool) -> Self {
        if is_expense {
            Self::Expense
        } else {
            Self::Income
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A recorded ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Display label, never empty
    pub name: String,

    /// Positive magnitude
    pub amount: Money,

    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a transaction with a fresh id
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            name: name.into(),
            amount,
            date,
            kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by the kind (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Check the invariants every stored transaction must satisfy
    pub fn check_invariants(&self) -> LedgerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation(format!(
                "Transaction {} has an empty name",
                self.id
            )));
        }
        if !self.amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Transaction {} has a non-positive amount ({})",
                self.id, self.amount
            )));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(LedgerError::Validation(format!(
                "Transaction {} exceeds the largest supported amount ({})",
                self.id, self.amount
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format(DATE_FORMAT),
            self.name,
            self.signed_amount()
        )
    }
}

/// Unvalidated input for a new transaction, as typed into a form
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub name: String,
    pub amount: String,
    pub date: String,
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            date: date.into(),
            kind,
        }
    }

    /// Validate the input and build a transaction with a fresh id
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if the name is blank, the amount is
    /// not a positive number up to [`Money::MAX_AMOUNT`], or the date is not
    /// a `YYYY-MM-DD` calendar date.
    pub fn validate(&self) -> LedgerResult<Transaction> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Name must not be empty".into()));
        }

        let amount = Money::parse(&self.amount)
            .map_err(|e| LedgerError::Validation(format!("Invalid amount: {}", e)))?;
        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Amount must be greater than zero, got '{}'",
                self.amount.trim()
            )));
        }
        if amount > Money::MAX_AMOUNT {
            return Err(LedgerError::Validation(format!(
                "Amount must not exceed {}, got '{}'",
                Money::MAX_AMOUNT,
                self.amount.trim()
            )));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid date format: '{}'. Use YYYY-MM-DD",
                self.date.trim()
            ))
        })?;

        Ok(Transaction::new(name, amount, date, self.kind))
    }
}

/// Accept both `2024-01-05` and full ISO-8601 timestamps such as
/// `2024-01-05T00:00:00.000Z`, keeping only the UTC calendar date.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_stored_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
