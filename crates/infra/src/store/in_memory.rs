use std::sync::RwLock;

use super::{RecordMap, RecordStore, StoreError};

/// In-memory record store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<RecordMap>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing records (e.g. to simulate a saved file).
    pub fn with_records(records: RecordMap) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Snapshot of the stored records.
    pub fn records(&self) -> RecordMap {
        match self.records.read() {
            Ok(map) => map.clone(),
            Err(_) => RecordMap::new(),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn read(&self) -> Result<RecordMap, StoreError> {
        let map = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.clone())
    }

    fn write(&self, records: &RecordMap) -> Result<(), StoreError> {
        let mut map = self.records.write().map_err(|_| StoreError::Poisoned)?;
        *map = records.clone();
        Ok(())
    }
}
