//! The ledger store
//!
//! Owns the authoritative, sorted sequence of transactions and writes the
//! whole sequence to its [`DurableStore`] after every successful mutation.
//!
//! Ordering is newest date first. Sorting is stable, so transactions that
//! share a date stay in insertion order: a new entry lands below existing
//! entries with the same date.
//!
//! `add` and `delete` are all-or-nothing. If the durable write fails the
//! in-memory sequence is put back exactly as it was and the storage error is
//! returned.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, Transaction, TransactionId};
use crate::reports::Totals;

use super::slot::DurableStore;

/// Key of the slot holding the serialized ledger
pub const TRANSACTIONS_KEY: &str = "transactions";

/// What happened when the persisted ledger was read at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was stored yet
    Empty,
    /// The stored ledger was read successfully
    Loaded(usize),
    /// Stored data existed but could not be used; the ledger starts empty
    Discarded(String),
}

/// A transaction that was just added, with its position in the sorted ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    pub transaction: Transaction,
    pub index: usize,
}

/// A transaction that was just removed, with the position it used to occupy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub transaction: Transaction,
    pub index: usize,
}

/// Total order of the ledger: date descending
///
/// Equal dates compare equal; combined with a stable sort this keeps them in
/// insertion order.
pub fn sort_order(a: &Transaction, b: &Transaction) -> Ordering {
    b.date.cmp(&a.date)
}

/// Ordered, persisted collection of transactions
///
/// Not thread-safe: callers sharing a store across threads must wrap it in a
/// single-writer lock.
pub struct LedgerStore<S: DurableStore> {
    backend: S,
    transactions: Vec<Transaction>,
    load_status: LoadStatus,
}

impl<S: DurableStore> LedgerStore<S> {
    /// Read the persisted ledger from `backend`
    ///
    /// Never fails: a missing slot, unreadable slot or malformed payload all
    /// produce an empty ledger. [`LedgerStore::load_status`] tells which.
    pub fn load(backend: S) -> Self {
        let (transactions, load_status) = match backend.get(TRANSACTIONS_KEY) {
            Ok(None) => (Vec::new(), LoadStatus::Empty),
            Ok(Some(raw)) => match decode(&raw) {
                Ok(transactions) => {
                    let count = transactions.len();
                    (transactions, LoadStatus::Loaded(count))
                }
                Err(reason) => (Vec::new(), LoadStatus::Discarded(reason)),
            },
            Err(e) => (Vec::new(), LoadStatus::Discarded(e.to_string())),
        };

        Self {
            backend,
            transactions,
            load_status,
        }
    }

    /// The full sorted sequence, top to bottom
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Current index of a transaction in the sorted sequence
    pub fn position(&self, id: &TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| &t.id == id)
    }

    /// Validate and insert a new transaction, then persist
    ///
    /// # Errors
    ///
    /// - `LedgerError::Validation` if the candidate is rejected or would push a
    ///   total out of range (nothing changes)
    /// - `LedgerError::Storage` if the durable write fails (nothing changes)
    pub fn add(&mut self, candidate: &NewTransaction) -> LedgerResult<Inserted> {
        let mut transaction = candidate.validate()?;
        while self.position(&transaction.id).is_some() {
            transaction.id = TransactionId::new();
        }

        let id = transaction.id.clone();
        self.transactions.push(transaction);
        self.transactions.sort_by(sort_order);

        let index = self
            .position(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        if let Err(e) = Totals::compute(&self.transactions) {
            self.transactions.remove(index);
            return Err(e);
        }

        if let Err(e) = self.persist() {
            self.transactions.remove(index);
            return Err(e);
        }

        Ok(Inserted {
            transaction: self.transactions[index].clone(),
            index,
        })
    }

    /// Remove a transaction by id, then persist
    ///
    /// # Errors
    ///
    /// - `LedgerError::NotFound` if no transaction has this id (nothing changes)
    /// - `LedgerError::Storage` if the durable write fails (nothing changes)
    pub fn delete(&mut self, id: &TransactionId) -> LedgerResult<Removed> {
        let index = self
            .position(id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        let transaction = self.transactions.remove(index);

        if let Err(e) = self.persist() {
            self.transactions.insert(index, transaction);
            return Err(e);
        }

        Ok(Removed { transaction, index })
    }

    /// Serialized form of the ledger, as written to the durable slot
    pub fn serialize(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string(&self.transactions)?)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn persist(&mut self) -> LedgerResult<()> {
        let payload = self.serialize()?;
        self.backend.set(TRANSACTIONS_KEY, &payload)
    }
}

/// Parse a stored payload into a sorted ledger
///
/// Records that `add` could never have produced (blank names, amounts out of
/// range, repeated ids, totals that overflow) make the whole payload malformed.
fn decode(raw: &str) -> Result<Vec<Transaction>, String> {
    let mut transactions: Vec<Transaction> =
        serde_json::from_str(raw).map_err(|e| format!("invalid ledger data: {}", e))?;

    let mut seen = HashSet::new();
    for txn in &transactions {
        txn.check_invariants().map_err(|e| e.to_string())?;
        if !seen.insert(txn.id.clone()) {
            return Err(format!("duplicate transaction id: {}", txn.id));
        }
    }

    Totals::compute(&transactions).map_err(|e| e.to_string())?;

    transactions.sort_by(sort_order);
    Ok(transactions)
}
