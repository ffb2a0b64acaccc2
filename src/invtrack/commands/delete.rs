use crate::audit::AuditTrail;
use crate::commands::helpers::{failure_details, resolve_position};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{InvError, Result};
use crate::index::Position;
use crate::model::{AuditAction, AuditStatus};
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    trail: &AuditTrail,
    user: &str,
    position: Position,
) -> Result<CmdResult> {
    let outcome = resolve_position(store, position).and_then(|index| store.delete(index));

    let removed = match outcome {
        Ok(removed) => removed,
        Err(e) => {
            let action = match e {
                InvError::Persistence { .. } => AuditAction::DeleteItem.error(),
                _ => AuditAction::DeleteItem.failed(),
            };
            trail.record(user, action, AuditStatus::Failed, failure_details(&e));
            return Err(e);
        }
    };

    trail.delete_item(user, &removed);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Item deleted ({}): {} ({})",
        position, removed.id, removed.name
    )));
    Ok(result.with_affected_records(vec![removed]))
}
