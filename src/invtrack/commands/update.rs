use crate::audit::AuditTrail;
use crate::commands::helpers::{failure_details, resolve_position, validated};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{InvError, Result};
use crate::index::Position;
use crate::model::{AuditAction, AuditStatus, InventoryRecord};
use crate::store::{RecordStore, StorageBackend};
use crate::validation::RecordForm;

fn apply<B: StorageBackend>(
    store: &mut RecordStore<B>,
    position: Position,
    form: &RecordForm,
) -> Result<(InventoryRecord, InventoryRecord)> {
    let index = resolve_position(store, position)?;
    let old = store.records()[index].clone();
    let new = validated(form)?;
    store.update(index, new.clone())?;
    Ok((old, new))
}

/// Replaces the record at `position` with the validated form.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    trail: &AuditTrail,
    user: &str,
    position: Position,
    form: &RecordForm,
) -> Result<CmdResult> {
    let (old, new) = match apply(store, position, form) {
        Ok(pair) => pair,
        Err(e) => {
            let action = match e {
                InvError::Persistence { .. } => AuditAction::UpdateItem.error(),
                _ => AuditAction::UpdateItem.failed(),
            };
            trail.record(user, action, AuditStatus::Failed, failure_details(&e));
            return Err(e);
        }
    };

    trail.update_item(user, &old, &new);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Item updated ({}): {} ({})",
        position, new.id, new.name
    )));
    Ok(result.with_affected_records(vec![new]))
}
