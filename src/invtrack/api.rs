//! # API Facade
//!
//! [`InventoryApi`] is the composition root of the core: it owns the one
//! [`RecordStore`], the one [`AuditTrail`] and the search settings for a
//! session, and it is what a UI holds on to. There are no process-wide
//! singletons; two `InventoryApi` values over different directories are
//! fully independent.
//!
//! The facade is thin. It converts UI inputs (positions, raw form text) and
//! dispatches to `commands/*.rs`, which hold the logic.
//!
//! All calls are expected on one thread. Nothing here locks, and a second
//! process writing the same files will corrupt them.

use crate::audit::AuditTrail;
use crate::commands;
use crate::config::InvConfig;
use crate::error::Result;
use crate::index::Position;
use crate::model::{AuditAction, InventoryRecord};
use crate::search::SearchIndex;
use crate::store::fs::CsvFileBackend;
use crate::store::{RecordStore, StorageBackend};
use crate::validation::RecordForm;
use std::path::Path;

pub struct InventoryApi<B: StorageBackend> {
    store: RecordStore<B>,
    trail: AuditTrail,
    search: SearchIndex,
    user: String,
}

impl InventoryApi<CsvFileBackend> {
    /// Wires the file-backed store and audit trail for `data_dir` and reads
    /// the inventory. This initial read is not audited; [`load`](Self::load)
    /// is the user-visible reload.
    pub fn open(data_dir: &Path, config: &InvConfig, user: impl Into<String>) -> Result<Self> {
        let store = RecordStore::open(CsvFileBackend::new(config.inventory_path(data_dir)))?;
        let trail = AuditTrail::new(config.audit_path(data_dir));
        let search = SearchIndex::new(config.search_placeholder.clone());
        Ok(Self::new(store, trail, search, user))
    }
}

impl<B: StorageBackend> InventoryApi<B> {
    pub fn new(
        store: RecordStore<B>,
        trail: AuditTrail,
        search: SearchIndex,
        user: impl Into<String>,
    ) -> Self {
        Self {
            store,
            trail,
            search,
            user: user.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn trail(&self) -> &AuditTrail {
        &self.trail
    }

    pub fn records(&self) -> &[InventoryRecord] {
        self.store.records()
    }

    pub fn load(&mut self) -> Result<commands::CmdResult> {
        commands::load::run(&mut self.store, &self.trail, &self.user)
    }

    pub fn add_item(&mut self, form: &RecordForm) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, &self.trail, &self.user, form)
    }

    pub fn update_item(
        &mut self,
        position: Position,
        form: &RecordForm,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, &self.trail, &self.user, position, form)
    }

    pub fn delete_item(&mut self, position: Position) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, &self.trail, &self.user, position)
    }

    /// Retries the last failed save.
    pub fn save(&self) -> Result<()> {
        self.store.save()
    }

    pub fn search(&self, keyword: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, &self.trail, &self.search, &self.user, keyword)
    }

    pub fn audit_log(&self, refresh: bool) -> Result<commands::CmdResult> {
        commands::audit_log::run(&self.trail, &self.user, refresh)
    }

    pub fn login(&self, outcome: &LoginOutcome) -> commands::CmdResult {
        commands::session::login(&self.trail, &self.user, outcome)
    }

    pub fn logout(&self) -> commands::CmdResult {
        commands::session::logout(&self.trail, &self.user)
    }

    pub fn cancel(&self, action: AuditAction, details: &str) -> commands::CmdResult {
        commands::session::cancel(&self.trail, &self.user, action, details)
    }

    pub fn init(&self, data_dir: &Path, config: &InvConfig) -> Result<commands::CmdResult> {
        commands::init::run(data_dir, config, &self.store, &self.trail)
    }
}

pub use commands::session::LoginOutcome;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvError;
    use tempfile::TempDir;

    fn chair_form() -> RecordForm {
        RecordForm {
            id: "1".into(),
            name: "Chair".into(),
            category: "Office".into(),
            quantity: "5".into(),
            unit: "pcs".into(),
            location: "Room 1".into(),
            condition: "Used".into(),
            date_acquired: "01/01/24".into(),
        }
    }

    fn api(dir: &Path) -> InventoryApi<CsvFileBackend> {
        let config = InvConfig::default();
        let store = RecordStore::new(CsvFileBackend::new(config.inventory_path(dir)));
        let trail = AuditTrail::new(config.audit_path(dir)).with_ip_address("127.0.0.1");
        InventoryApi::new(store, trail, SearchIndex::default(), "ana")
    }

    #[test]
    fn add_reload_delete_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut api = api(dir.path());
        assert!(api.load().unwrap().listed_records.is_empty());

        api.add_item(&chair_form()).unwrap();

        let mut fresh = self::api(dir.path());
        let loaded = fresh.load().unwrap();
        assert_eq!(loaded.listed_records.len(), 1);
        assert_eq!(loaded.listed_records[0].record.name, "Chair");
        assert_eq!(loaded.listed_records[0].record.quantity, 5);

        fresh.delete_item(Position::new(1).unwrap()).unwrap();
        assert!(self::api(dir.path()).load().unwrap().listed_records.is_empty());
    }

    #[test]
    fn duplicate_add_leaves_one_record() {
        let dir = TempDir::new().unwrap();
        let mut api = api(dir.path());
        api.add_item(&chair_form()).unwrap();

        let err = api.add_item(&chair_form()).unwrap_err();
        assert!(matches!(err, InvError::DuplicateKey(_)));
        assert_eq!(api.records().len(), 1);
    }

    #[test]
    fn every_action_lands_in_the_audit_log() {
        let dir = TempDir::new().unwrap();
        let mut api = api(dir.path());
        api.login(&LoginOutcome::Success);
        api.load().unwrap();
        api.add_item(&chair_form()).unwrap();
        api.search("chair").unwrap();
        api.cancel(AuditAction::DeleteItem, "Deletion cancelled by user");
        api.logout();

        let view = api.audit_log(false).unwrap();
        let actions: Vec<String> = view
            .audit_entries
            .iter()
            .map(|e| e.action.to_string())
            .collect();
        assert_eq!(
            actions,
            [
                "LOGIN_SUCCESS",
                "LOAD_INVENTORY",
                "ADD_ITEM",
                "SEARCH_INVENTORY",
                "DELETE_ITEM_CANCELLED",
                "LOGOUT",
                "VIEW_AUDIT_LOG",
            ]
        );
        assert!(view.audit_entries.iter().all(|e| e.username == "ana"));
    }
}
