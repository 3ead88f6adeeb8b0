//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Types of ledger operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
///
/// `after` holds the transaction as created, `before` the transaction as it
/// was just before deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Id of the affected transaction
    pub entity_id: String,

    /// Human-readable description, e.g. "2024-01-05 Rent"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Position of the transaction in the sorted ledger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a transaction that was added at `index`
    pub fn create(transaction: &Transaction, index: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_id: transaction.id.to_string(),
            entity_name: Some(describe(transaction)),
            index: Some(index),
            before: None,
            after: serde_json::to_value(transaction).ok(),
        }
    }

    /// Entry for a transaction that was removed from `index`
    pub fn delete(transaction: &Transaction, index: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_id: transaction.id.to_string(),
            entity_name: Some(describe(transaction)),
            index: Some(index),
            before: serde_json::to_value(transaction).ok(),
            after: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        output
    }
}

fn describe(transaction: &Transaction) -> String {
    format!(
        "{} {} {}",
        transaction.date, transaction.name, transaction.kind
    )
}
