use crate::audit::AuditTrail;
use crate::commands::helpers::{failure_details, validated};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{InvError, Result};
use crate::model::{AuditAction, AuditStatus};
use crate::store::{RecordStore, StorageBackend};
use crate::validation::RecordForm;

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    trail: &AuditTrail,
    user: &str,
    form: &RecordForm,
) -> Result<CmdResult> {
    let outcome = validated(form).and_then(|record| {
        store.add(record.clone())?;
        Ok(record)
    });

    let record = match outcome {
        Ok(record) => record,
        Err(e) => {
            let action = match e {
                InvError::Persistence { .. } => AuditAction::AddItem.error(),
                _ => AuditAction::AddItem.failed(),
            };
            trail.record(user, action, AuditStatus::Failed, failure_details(&e));
            return Err(e);
        }
    };

    trail.add_item(user, &record);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Item added: {} ({})",
        record.id, record.name
    )));
    Ok(result.with_affected_records(vec![record]))
}
