//! Storage layer for ledger-cli
//!
//! Durable key-value slots backed by atomically written JSON files, and the
//! ledger store that persists through them.

pub mod file_io;
pub mod ledger;
pub mod slot;

pub use file_io::{read_text, write_text_atomic};
pub use ledger::{sort_order, Inserted, LedgerStore, LoadStatus, Removed, TRANSACTIONS_KEY};
pub use slot::{DurableStore, FileStore, MemoryStore};

use crate::audit::AuditLogger;
use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerError;
use crate::services::LedgerService;

/// Main storage coordinator: the on-disk ledger plus its audit log
pub struct Storage {
    paths: LedgerPaths,
    pub ledger: LedgerStore<FileStore>,
    audit: AuditLogger,
}

impl Storage {
    /// Create the data directories if needed and load the ledger
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerStore::load(FileStore::new(paths.data_dir())),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// A service over the ledger, audited when the settings ask for it
    pub fn service(&mut self, settings: &Settings) -> LedgerService<'_, FileStore> {
        let service = LedgerService::new(&mut self.ledger);
        if settings.audit_enabled {
            service.with_audit(&self.audit)
        } else {
            service
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.ledger.is_empty());
        assert_eq!(storage.ledger.load_status(), &LoadStatus::Empty);
    }

    #[test]
    fn test_service_persists_and_audits() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        let mut storage = Storage::new(paths.clone()).unwrap();
        storage
            .service(&settings)
            .submit_form("Salary", "1000", "2024-01-01", false)
            .unwrap();
        assert_eq!(storage.audit().entry_count().unwrap(), 1);

        let reopened = Storage::new(paths.clone()).unwrap();
        assert_eq!(reopened.ledger.len(), 1);
        assert!(paths.slot_file(TRANSACTIONS_KEY).exists());
    }

    #[test]
    fn test_audit_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };

        let mut storage = Storage::new(paths).unwrap();
        storage
            .service(&settings)
            .submit_form("Salary", "1000", "2024-01-01", false)
            .unwrap();

        assert!(!storage.audit().exists());
    }

    #[test]
    fn test_corrupt_ledger_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.slot_file(TRANSACTIONS_KEY), "garbage").unwrap();

        let storage = Storage::new(paths).unwrap();
        assert!(storage.ledger.is_empty());
        assert!(matches!(
            storage.ledger.load_status(),
            LoadStatus::Discarded(_)
        ));
    }
}
