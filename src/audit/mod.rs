//! Audit logging for ledger-cli
//!
//! Every successful add and delete is appended to an audit log as one JSON
//! object per line (JSONL), with the affected transaction attached.
//!
//! - `AuditEntry`: timestamp, operation, transaction id and snapshot.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
