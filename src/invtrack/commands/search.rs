use crate::audit::AuditTrail;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::search::SearchIndex;
use crate::store::{RecordStore, StorageBackend};

/// Filters the current records. A blank keyword lists everything and is
/// not audited.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    trail: &AuditTrail,
    index: &SearchIndex,
    user: &str,
    keyword: &str,
) -> Result<CmdResult> {
    let found = index.filter(store.records(), keyword);
    let mut result = CmdResult::default();

    if !index.is_blank(keyword) {
        let keyword = keyword.trim();
        trail.search_inventory(user, keyword, found.len(), store.len());
        if found.is_empty() {
            result.add_message(CmdMessage::info(format!("No items match '{}'", keyword)));
        }
    }

    Ok(result.with_listed_records(found))
}
