use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value;
use tracing::warn;

use crate::DatasetStore;
use crate::errors::{StoreError, StoreResult};
use crate::model::{DatasetMetadata, LoadedDataset, checksum, encode, seal, validate_id};

struct Entry {
    bytes: Vec<u8>,
    metadata: DatasetMetadata,
}

/// Process-local store, mainly for tests and dry runs.
#[derive(Default)]
pub struct MemoryDatasetStore {
    entries: RwLock<BTreeMap<String, Entry>>,
}

impl MemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetStore for MemoryDatasetStore {
    fn save(&self, id: &str, dataset: &Value) -> StoreResult<String> {
        self.save_with_metadata(id, dataset, DatasetMetadata::describe(dataset))
    }

    fn save_with_metadata(
        &self,
        id: &str,
        dataset: &Value,
        metadata: DatasetMetadata,
    ) -> StoreResult<String> {
        validate_id(id)?;
        let bytes = encode(dataset)?;
        let metadata = seal(id, &bytes, metadata);
        self.entries
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(id.to_string(), Entry { bytes, metadata });
        Ok(self.url(id))
    }

    fn load(&self, id: &str) -> StoreResult<Option<Value>> {
        Ok(self.load_verified(id)?.map(|loaded| loaded.data))
    }

    fn load_verified(&self, id: &str) -> StoreResult<Option<LoadedDataset>> {
        validate_id(id)?;
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        let Some(entry) = entries.get(id) else {
            return Ok(None);
        };

        let checksum_ok = checksum(&entry.bytes) == entry.metadata.checksum;
        if !checksum_ok {
            warn!(
                event = "checksum_mismatch",
                id,
                expected = %entry.metadata.checksum,
                "stored dataset does not match its checksum"
            );
        }
        Ok(Some(LoadedDataset {
            data: serde_json::from_slice(&entry.bytes)?,
            metadata: Some(entry.metadata.clone()),
            checksum_ok,
        }))
    }

    fn exists(&self, id: &str) -> StoreResult<bool> {
        validate_id(id)?;
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.contains_key(id))
    }

    fn metadata(&self, id: &str) -> StoreResult<Option<DatasetMetadata>> {
        validate_id(id)?;
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(id).map(|entry| entry.metadata.clone()))
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }

    fn url(&self, id: &str) -> String {
        format!("memory://datasets/{id}")
    }
}
