//! Ledger service
//!
//! The boundary the presentation layer calls: turns raw form input into store
//! operations, resolves user-typed ids, and records successful mutations in
//! the audit log. The store is passed in explicitly; the service holds no
//! state of its own beyond the last audit failure.

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, Transaction, TransactionKind};
use crate::reports::Totals;
use crate::storage::{DurableStore, Inserted, LedgerStore, Removed};

/// Service for adding, deleting and summarizing ledger transactions
pub struct LedgerService<'a, S: DurableStore> {
    store: &'a mut LedgerStore<S>,
    audit: Option<&'a AuditLogger>,
    audit_error: Option<LedgerError>,
}

impl<'a, S: DurableStore> LedgerService<'a, S> {
    pub fn new(store: &'a mut LedgerStore<S>) -> Self {
        Self {
            store,
            audit: None,
            audit_error: None,
        }
    }

    /// Record every successful add and delete in `audit`
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Add a transaction from raw form fields
    pub fn submit_form(
        &mut self,
        name: &str,
        amount_text: &str,
        date_text: &str,
        is_expense: bool,
    ) -> LedgerResult<Inserted> {
        let candidate = NewTransaction::new(
            name,
            amount_text,
            date_text,
            TransactionKind::from_expense_flag(is_expense),
        );
        self.add(&candidate)
    }

    pub fn add(&mut self, candidate: &NewTransaction) -> LedgerResult<Inserted> {
        let inserted = self.store.add(candidate)?;
        self.record(AuditEntry::create(&inserted.transaction, inserted.index));
        Ok(inserted)
    }

    /// Delete the transaction identified by a full id or a unique id prefix
    ///
    /// Confirmation is the caller's job; this deletes immediately.
    pub fn request_delete(&mut self, identifier: &str) -> LedgerResult<Removed> {
        let id = self
            .find(identifier)?
            .map(|t| t.id.clone())
            .ok_or_else(|| LedgerError::transaction_not_found(identifier))?;

        let removed = self.store.delete(&id)?;
        self.record(AuditEntry::delete(&removed.transaction, removed.index));
        Ok(removed)
    }

    /// Look up a transaction by full id, or by a prefix matching exactly one id
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if the prefix matches several ids.
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<&Transaction>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        let transactions = self.store.transactions();
        if let Some(exact) = transactions.iter().find(|t| t.id.as_str() == identifier) {
            return Ok(Some(exact));
        }

        let mut matches = transactions
            .iter()
            .filter(|t| t.id.as_str().starts_with(identifier));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(Some(only)),
            (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
                "Id prefix '{}' matches more than one transaction",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// The full ledger in display order
    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn totals(&self) -> LedgerResult<Totals> {
        Totals::compute(self.store.transactions())
    }

    /// Take the error from the most recent failed audit write, if any
    ///
    /// Audit failures never undo a mutation that already reached durable
    /// storage, so they are parked here instead of being returned.
    pub fn take_audit_error(&mut self) -> Option<LedgerError> {
        self.audit_error.take()
    }

    fn record(&mut self, entry: AuditEntry) {
        if let Some(audit) = self.audit {
            if let Err(e) = audit.log(&entry) {
                self.audit_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Money, TransactionId};
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    #[test]
    fn test_submit_form_scenario() {
        let mut store = LedgerStore::load(MemoryStore::new());
        let mut service = LedgerService::new(&mut store);

        let salary = service
            .submit_form("Salary", "1000", "2024-01-01", false)
            .unwrap();
        assert_eq!(salary.transaction.kind, TransactionKind::Income);

        let rent = service.submit_form("Rent", "400", "2024-01-05", true).unwrap();
        assert_eq!(rent.transaction.kind, TransactionKind::Expense);
        assert_eq!(rent.index, 0);

        let totals = service.totals().unwrap();
        assert_eq!(totals.income, Money::from_cents(100000));
        assert_eq!(totals.expense, Money::from_cents(40000));
        assert_eq!(totals.balance, Money::from_cents(60000));

        let removed = service.request_delete(rent.transaction.id.as_str()).unwrap();
        assert_eq!(removed.index, 0);
        assert_eq!(service.transactions().len(), 1);
        assert_eq!(service.totals().unwrap().balance, Money::from_cents(100000));
    }

    #[test]
    fn test_submit_form_validation() {
        let mut store = LedgerStore::load(MemoryStore::new());
        let mut service = LedgerService::new(&mut store);

        assert!(service
            .submit_form("", "10", "2024-01-01", false)
            .unwrap_err()
            .is_validation());
        assert!(service
            .submit_form("Coffee", "-5", "2024-01-01", true)
            .unwrap_err()
            .is_validation());
        assert!(service
            .submit_form("Coffee", "abc", "2024-01-01", true)
            .unwrap_err()
            .is_validation());
        assert!(service.transactions().is_empty());
    }

    #[test]
    fn test_oversized_amounts_never_reach_totals() {
        let mut store = LedgerStore::load(MemoryStore::new());
        let mut service = LedgerService::new(&mut store);

        for name in ["A", "B"] {
            assert!(service
                .submit_form(name, "90000000000000000", "2024-01-01", false)
                .unwrap_err()
                .is_validation());
        }
        assert!(service.transactions().is_empty());
        assert_eq!(service.totals().unwrap().balance, Money::zero());
    }

    #[test]
    fn test_find_by_prefix() {
        let mut store = LedgerStore::load(MemoryStore::new());
        let mut service = LedgerService::new(&mut store);
        let added = service.submit_form("Salary", "1000", "2024-01-01", false).unwrap();

        let short = added.transaction.id.short().to_string();
        let found = service.find(&short).unwrap().unwrap();
        assert_eq!(found.id, added.transaction.id);

        assert!(service.find("").unwrap().is_none());
        assert!(service.find("zzzz-not-an-id").unwrap().is_none());
    }

    #[test]
    fn test_find_ambiguous_prefix() {
        let raw = r#"[
            {"id":"abc-1","name":"One","amount":1,"date":"2024-01-01","type":"income"},
            {"id":"abc-2","name":"Two","amount":1,"date":"2024-01-01","type":"income"}
        ]"#;
        let mut store = LedgerStore::load(MemoryStore::with_value("transactions", raw));
        let service = LedgerService::new(&mut store);

        assert!(service.find("abc").unwrap_err().is_validation());
        assert_eq!(service.find("abc-2").unwrap().unwrap().name, "Two");
    }

    #[test]
    fn test_request_delete_unknown_id() {
        let mut store = LedgerStore::load(MemoryStore::new());
        let mut service = LedgerService::new(&mut store);
        service.submit_form("Salary", "1000", "2024-01-01", false).unwrap();

        let err = service.request_delete("missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.transactions().len(), 1);
        assert!(store.get(&TransactionId::from("missing")).is_none());
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = LedgerStore::load(MemoryStore::new());
        let mut service = LedgerService::new(&mut store).with_audit(&audit);

        let added = service.submit_form("Salary", "1000", "2024-01-01", false).unwrap();
        service.submit_form("", "1", "2024-01-01", false).unwrap_err();
        service.request_delete(added.transaction.id.as_str()).unwrap();

        let entries = audit.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert_eq!(entries[1].entity_id, added.transaction.id.to_string());
        assert!(service.take_audit_error().is_none());
    }

    #[test]
    fn test_audit_failure_does_not_undo_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLogger::new(temp_dir.path().join("missing-dir").join("audit.log"));
        let mut store = LedgerStore::load(MemoryStore::new());
        let mut service = LedgerService::new(&mut store).with_audit(&audit);

        service.submit_form("Salary", "1000", "2024-01-01", false).unwrap();

        assert_eq!(service.transactions().len(), 1);
        assert!(service.take_audit_error().is_some());
        assert!(service.take_audit_error().is_none());
    }

    #[test]
    fn test_persistence_failure_surfaces() {
        let mut store = LedgerStore::load(MemoryStore::new());
        store.backend_mut().set_fail_writes(true);
        let mut service = LedgerService::new(&mut store);

        let err = service
            .submit_form("Salary", "1000", "2024-01-01", false)
            .unwrap_err();
        assert!(err.is_storage());
        assert!(service.transactions().is_empty());
    }
}
