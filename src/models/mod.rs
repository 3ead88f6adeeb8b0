//! Core data models for ledger-cli

pub mod ids;
pub mod money;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{NewTransaction, Transaction, TransactionKind, DATE_FORMAT};
