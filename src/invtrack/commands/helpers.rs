use crate::error::{InvError, Result};
use crate::index::Position;
use crate::store::{RecordStore, StorageBackend};
use crate::validation::{validate, RecordForm};
use crate::model::InventoryRecord;

/// Maps a user-facing position to a store index, checking it exists.
pub fn resolve_position<B: StorageBackend>(
    store: &RecordStore<B>,
    position: Position,
) -> Result<usize> {
    let index = position.to_index();
    if index < store.len() {
        Ok(index)
    } else {
        Err(InvError::NotFound(position.get()))
    }
}

pub fn validated(form: &RecordForm) -> Result<InventoryRecord> {
    validate(form).map_err(InvError::Validation)
}

/// Text for the audit details of a rejected or failed action.
pub fn failure_details(err: &InvError) -> String {
    match err {
        InvError::Validation(e) => format!("Validation failed: {}", e),
        InvError::DuplicateKey(id) => format!("Duplicate Item ID: {}", id),
        InvError::NotFound(pos) => format!("No record at position {}", pos),
        other => format!("Error: {}", other),
    }
}
