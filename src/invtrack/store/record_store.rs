use super::StorageBackend;
use crate::error::{InvError, Result};
use crate::model::InventoryRecord;
use tracing::warn;

/// The authoritative inventory collection and its file synchronization.
///
/// Rows are addressed by 0-based index in store order. The collection is
/// only touched through this type, so the id uniqueness check always runs
/// against the current snapshot right before the mutation it guards.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    records: Vec<InventoryRecord>,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Creates a store with an empty collection. Call [`load`](Self::load)
    /// to read what the backend holds.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
        }
    }

    /// Creates a store and loads it.
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Self::new(backend);
        store.load()?;
        Ok(store)
    }

    /// Replaces the in-memory collection with what the backend holds.
    pub fn load(&mut self) -> Result<&[InventoryRecord]> {
        self.records = self.backend.load_rows()?;
        Ok(&self.records)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&InventoryRecord> {
        self.records.get(index)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn find<P>(&self, predicate: P) -> Vec<&InventoryRecord>
    where
        P: Fn(&InventoryRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    pub fn add(&mut self, record: InventoryRecord) -> Result<()> {
        if self.position_of(&record.id).is_some() {
            return Err(InvError::DuplicateKey(record.id));
        }
        self.records.push(record);
        self.save()
    }

    /// Full replace of the row at `index`. The id may change as long as it
    /// does not collide with another row.
    pub fn update(&mut self, index: usize, record: InventoryRecord) -> Result<()> {
        if index >= self.records.len() {
            return Err(InvError::NotFound(index + 1));
        }
        if let Some(other) = self.position_of(&record.id) {
            if other != index {
                return Err(InvError::DuplicateKey(record.id));
            }
        }
        self.records[index] = record;
        self.save()
    }

    pub fn delete(&mut self, index: usize) -> Result<InventoryRecord> {
        if index >= self.records.len() {
            return Err(InvError::NotFound(index + 1));
        }
        let removed = self.records.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Writes the current collection through the backend.
    ///
    /// On failure the collection is left as is; memory and disk differ until
    /// the next successful save.
    pub fn save(&self) -> Result<()> {
        self.backend.save_rows(&self.records).inspect_err(|e| {
            warn!(
                location = %self.backend.location().display(),
                error = %e,
                "inventory change kept in memory but not saved"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fs::CsvFileBackend;
    use crate::store::memory::MemBackend;
    use tempfile::TempDir;

    fn record(id: &str, name: &str) -> InventoryRecord {
        InventoryRecord {
            id: id.into(),
            name: name.into(),
            category: "Office".into(),
            quantity: 5,
            unit: "pcs".into(),
            location: "Room 1".into(),
            condition: "Used".into(),
            date_acquired: "01/01/24".into(),
        }
    }

    #[test]
    fn add_rewrites_backend() {
        let mut store = RecordStore::new(MemBackend::new());
        store.add(record("1", "Chair")).unwrap();
        store.add(record("2", "Desk")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.backend().save_count(), 2);
        assert_eq!(store.backend().stored_rows(), store.records());
    }

    #[test]
    fn duplicate_id_is_rejected_without_mutation() {
        let mut store = RecordStore::new(MemBackend::new());
        store.add(record("1", "Chair")).unwrap();

        let err = store.add(record("1", "Other chair")).unwrap_err();
        assert!(matches!(err, InvError::DuplicateKey(ref id) if id == "1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].name, "Chair");
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn update_keeps_position_and_allows_same_id() {
        let mut store = RecordStore::new(MemBackend::new());
        store.add(record("1", "Chair")).unwrap();
        store.add(record("2", "Desk")).unwrap();

        store.update(0, record("1", "Armchair")).unwrap();
        assert_eq!(store.records()[0].name, "Armchair");

        store.update(0, record("7", "Armchair")).unwrap();
        assert_eq!(store.records()[0].id, "7");
        assert_eq!(store.records()[1].id, "2");
    }

    #[test]
    fn update_rejects_collision_with_other_row() {
        let mut store = RecordStore::new(MemBackend::new());
        store.add(record("1", "Chair")).unwrap();
        store.add(record("2", "Desk")).unwrap();

        let err = store.update(0, record("2", "Chair")).unwrap_err();
        assert!(matches!(err, InvError::DuplicateKey(_)));
        assert_eq!(store.records()[0].id, "1");
    }

    #[test]
    fn out_of_range_index_is_not_found() {
        let mut store = RecordStore::new(MemBackend::new());
        let err = store.delete(0).unwrap_err();
        assert!(matches!(err, InvError::NotFound(1)));
        assert_eq!(err.to_string(), "No record at position 1");
        assert!(matches!(
            store.update(3, record("1", "Chair")),
            Err(InvError::NotFound(4))
        ));
    }

    #[test]
    fn failed_save_keeps_mutation_in_memory() {
        let mut store = RecordStore::new(MemBackend::new());
        store.add(record("1", "Chair")).unwrap();
        store.backend().set_simulate_write_error(true);

        let err = store.add(record("2", "Desk")).unwrap_err();
        assert!(err.is_unsaved());
        assert_eq!(store.len(), 2);
        assert_eq!(store.backend().stored_rows().len(), 1);

        // Retry once the backend recovers.
        store.backend().set_simulate_write_error(false);
        store.save().unwrap();
        assert_eq!(store.backend().stored_rows().len(), 2);
    }

    #[test]
    fn find_is_a_pure_read() {
        let mut store = RecordStore::new(MemBackend::new());
        store.add(record("1", "Chair")).unwrap();
        store.add(record("2", "Desk")).unwrap();
        let saves = store.backend().save_count();

        let found = store.find(|r| r.name.starts_with('D'));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
        assert_eq!(store.backend().save_count(), saves);
    }

    #[test]
    fn add_load_delete_scenario_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory_data.csv");
        let chair = record("1", "Chair");

        let mut store = RecordStore::open(CsvFileBackend::new(&path)).unwrap();
        assert!(store.is_empty());
        store.add(chair.clone()).unwrap();

        let mut reopened = RecordStore::open(CsvFileBackend::new(&path)).unwrap();
        assert_eq!(reopened.records(), &[chair.clone()]);

        let index = reopened.position_of("1").unwrap();
        let removed = reopened.delete(index).unwrap();
        assert_eq!(removed, chair);

        let mut again = RecordStore::new(CsvFileBackend::new(&path));
        assert!(again.load().unwrap().is_empty());
    }

    #[test]
    fn load_returns_every_well_formed_row() {
        let rows: Vec<_> = (1..=5).map(|i| record(&i.to_string(), "Item")).collect();
        let mut store = RecordStore::new(MemBackend::with_rows(rows.clone()));
        assert_eq!(store.load().unwrap(), rows.as_slice());
    }
}
