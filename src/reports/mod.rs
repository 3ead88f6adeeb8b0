//! Reports module for ledger-cli
//!
//! Figures derived from the ledger without mutating it.

pub mod totals;

pub use totals::{balance, expense_total, income_total, Totals};
