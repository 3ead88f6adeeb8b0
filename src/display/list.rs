//! Rendered transaction list kept in step with the ledger
//!
//! The view never works out positions on its own. It only applies the
//! indices returned by the store: insert after `add`, remove after `delete`,
//! full render after `load`.

use crate::error::{LedgerError, LedgerResult};
use crate::storage::{Inserted, Removed};

/// An ordered list of rendered rows mirroring the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    rows: Vec<String>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every row, top to bottom
    pub fn render_all<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.rows = rows.into_iter().collect();
    }

    /// Insert a row at `index`: prepend at 0, otherwise right after row `index - 1`
    pub fn insert_at(&mut self, index: usize, row: String) -> LedgerResult<()> {
        if index == 0 {
            self.rows.insert(0, row);
            return Ok(());
        }
        if index > self.rows.len() {
            return Err(LedgerError::View(format!(
                "cannot insert at {} in a list of {} rows",
                index,
                self.rows.len()
            )));
        }
        self.rows.insert(index, row);
        Ok(())
    }

    /// Remove and return the row at `index`
    pub fn remove_at(&mut self, index: usize) -> LedgerResult<String> {
        if index >= self.rows.len() {
            return Err(LedgerError::View(format!(
                "cannot remove row {} from a list of {} rows",
                index,
                self.rows.len()
            )));
        }
        Ok(self.rows.remove(index))
    }

    /// Reflect a successful add
    pub fn on_added(&mut self, inserted: &Inserted, row: String) -> LedgerResult<()> {
        self.insert_at(inserted.index, row)
    }

    /// Reflect a successful delete
    pub fn on_removed(&mut self, removed: &Removed) -> LedgerResult<String> {
        self.remove_at(removed.index)
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
