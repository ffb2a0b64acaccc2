use crate::audit::AuditTrail;
use crate::commands::helpers::failure_details;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::index_records;
use crate::model::{AuditAction, AuditStatus};
use crate::store::{RecordStore, StorageBackend};

/// Re-reads the inventory from its backing file.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    trail: &AuditTrail,
    user: &str,
) -> Result<CmdResult> {
    let listed = match store.load() {
        Ok(records) => index_records(records),
        Err(e) => {
            trail.record(
                user,
                AuditAction::LoadInventory.error(),
                AuditStatus::Failed,
                failure_details(&e),
            );
            return Err(e);
        }
    };

    trail.load_inventory(user, listed.len());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Loaded {} items", listed.len())));
    Ok(result.with_listed_records(listed))
}
