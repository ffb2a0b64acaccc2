//! # Storage Layer
//!
//! The inventory lives in memory as an ordered `Vec` owned by
//! [`RecordStore`]. Every mutation is followed by a full rewrite of the
//! backing file through a [`StorageBackend`].
//!
//! ## Why a full rewrite
//!
//! Updates and deletes need the whole file rewritten to stay consistent, so
//! adds go through the same path. At the sizes this tool deals with the cost
//! is irrelevant, and it keeps the file and the table in the same order.
//! Keeping the write policy behind the trait means a batching backend could
//! be dropped in without touching callers.
//!
//! ## Implementations
//!
//! - [`fs::CsvFileBackend`]: the production `inventory_data.csv` file.
//!   Rows are written to a temporary sibling and renamed into place.
//! - [`memory::MemBackend`]: in-memory rows for tests, with write error
//!   simulation.
//!
//! ## Failure semantics
//!
//! A failed write surfaces as [`InvError::Persistence`](crate::error::InvError)
//! but the in-memory change is kept. Callers decide whether to retry
//! [`RecordStore::save`] or warn the user.
//!
//! There is no file locking. Two processes writing the same file will lose
//! each other's changes.

use crate::error::Result;
use crate::model::InventoryRecord;
use std::path::PathBuf;

pub mod fs;
pub mod memory;
pub mod record_store;

pub use record_store::RecordStore;

/// Raw row I/O. The backend knows nothing about ids or uniqueness.
pub trait StorageBackend {
    /// Read all well-formed rows in file order. A missing file is empty.
    fn load_rows(&self) -> Result<Vec<InventoryRecord>>;

    /// Replace the stored rows with `rows`.
    fn save_rows(&self, rows: &[InventoryRecord]) -> Result<()>;

    /// Where the rows live, for messages. Virtual for non-file backends.
    fn location(&self) -> PathBuf;
}
