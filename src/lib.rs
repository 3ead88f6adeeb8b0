//! ledger-cli - Terminal-based personal income and expense ledger
//!
//! Records income and expense transactions, keeps them newest first, persists
//! them to a local JSON file and derives income, expense and balance totals.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Transactions, ids and money
//! - `storage`: Durable key-value slots and the ordered ledger store
//! - `reports`: Totals derived from the ledger
//! - `services`: The add/delete boundary used by front ends
//! - `audit`: Append-only audit log
//! - `display`: Terminal formatting and the rendered transaction list
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use ledger_cli::services::LedgerService;
//! use ledger_cli::storage::{LedgerStore, MemoryStore};
//!
//! let mut store = LedgerStore::load(MemoryStore::new());
//! let mut service = LedgerService::new(&mut store);
//!
//! service.submit_form("Salary", "1000", "2024-01-01", false)?;
//! let rent = service.submit_form("Rent", "400", "2024-01-05", true)?;
//! assert_eq!(rent.index, 0);
//! assert_eq!(service.totals()?.balance.cents(), 60000);
//! # Ok::<(), ledger_cli::LedgerError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
