use crate::audit::AuditTrail;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::InvConfig;
use crate::error::{InvError, Result};
use crate::store::{RecordStore, StorageBackend};
use std::path::Path;

/// Writes the config (if absent) and makes sure both data files exist.
pub fn run<B: StorageBackend>(
    data_dir: &Path,
    config: &InvConfig,
    store: &RecordStore<B>,
    trail: &AuditTrail,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if !InvConfig::exists_in(data_dir) {
        config.save(data_dir)?;
        result.add_message(CmdMessage::info(format!(
            "Wrote config to {}",
            InvConfig::path_in(data_dir).display()
        )));
    }

    let inventory = store.backend().location();
    if !inventory.exists() {
        store.save()?;
        result.add_message(CmdMessage::success(format!(
            "Created {}",
            inventory.display()
        )));
    }

    if trail.ensure_initialized().map_err(InvError::Io)? {
        result.add_message(CmdMessage::success(format!(
            "Created {}",
            trail.path().display()
        )));
    }

    if result.messages.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Already initialized in {}",
            data_dir.display()
        )));
    }
    Ok(result)
}
