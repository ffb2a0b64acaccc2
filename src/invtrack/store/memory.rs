use super::StorageBackend;
use crate::error::{InvError, Result};
use crate::model::InventoryRecord;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// `save_count` lets tests assert that every mutation went through a rewrite.
#[derive(Default)]
pub struct MemBackend {
    rows: RefCell<Vec<InventoryRecord>>,
    simulate_write_error: Cell<bool>,
    save_count: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<InventoryRecord>) -> Self {
        Self {
            rows: RefCell::new(rows),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// What the last successful save stored.
    pub fn stored_rows(&self) -> Vec<InventoryRecord> {
        self.rows.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_rows(&self) -> Result<Vec<InventoryRecord>> {
        Ok(self.rows.borrow().clone())
    }

    fn save_rows(&self, rows: &[InventoryRecord]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(InvError::Persistence {
                path: self.location(),
                source: std::io::Error::other("simulated write error"),
            });
        }
        *self.rows.borrow_mut() = rows.to_vec();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://inventory")
    }
}
