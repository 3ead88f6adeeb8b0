//! Ledger totals
//!
//! Income, expense and balance derived from a sequence of transactions.
//! Everything is recomputed from scratch on each call; personal ledgers are
//! small enough that a linear pass per mutation is fine.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionKind};

/// Sum of all income amounts
pub fn income_total(transactions: &[Transaction]) -> LedgerResult<Money> {
    sum_of(transactions, TransactionKind::Income)
}

/// Sum of all expense amounts, as a positive magnitude
pub fn expense_total(transactions: &[Transaction]) -> LedgerResult<Money> {
    sum_of(transactions, TransactionKind::Expense)
}

/// Income total minus expense total
pub fn balance(transactions: &[Transaction]) -> LedgerResult<Money> {
    Ok(Totals::compute(transactions)?.balance)
}

fn sum_of(transactions: &[Transaction], kind: TransactionKind) -> LedgerResult<Money> {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .try_fold(Money::zero(), |acc, t| {
            acc.checked_add(t.amount).ok_or_else(|| overflow(kind))
        })
}

fn overflow(kind: TransactionKind) -> LedgerError {
    LedgerError::Validation(format!("The {} total exceeds the supported range", kind))
}

/// Snapshot of the three totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

impl Totals {
    /// Compute all three totals
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if a total does not fit in the
    /// money range.
    pub fn compute(transactions: &[Transaction]) -> LedgerResult<Self> {
        let income = income_total(transactions)?;
        let expense = expense_total(transactions)?;
        let balance = income.checked_sub(expense).ok_or_else(|| {
            LedgerError::Validation("The balance exceeds the supported range".into())
        })?;
        Ok(Self {
            income,
            expense,
            balance,
        })
    }
}
