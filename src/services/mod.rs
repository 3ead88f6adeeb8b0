//! Service layer for ledger-cli
//!
//! Business logic on top of the storage layer: input validation, id
//! resolution, audit logging and derived totals.

pub mod ledger;

pub use ledger::LedgerService;
