//! Dataset Store: persists assembled dataset JSON blobs by id.
//!
//! The generator never depends on a backend; callers pick one of the
//! [`DatasetStore`] implementations shipped here.

mod atomic;
pub mod errors;
pub mod fs;
pub mod memory;
pub mod model;

pub use errors::{StoreError, StoreResult};
pub use fs::FsDatasetStore;
pub use memory::MemoryDatasetStore;
pub use model::{DatasetMetadata, LoadedDataset, checksum, envelope, validate_id};

use serde_json::Value;

/// Contract of a dataset persistence backend.
pub trait DatasetStore: Send + Sync {
    /// Persist `dataset` under `id` and return the URL it can be fetched from.
    fn save(&self, id: &str, dataset: &Value) -> StoreResult<String>;

    /// Persist with extra descriptive metadata.
    fn save_with_metadata(
        &self,
        id: &str,
        dataset: &Value,
        metadata: DatasetMetadata,
    ) -> StoreResult<String>;

    /// Load a dataset; `None` when the id is unknown.
    fn load(&self, id: &str) -> StoreResult<Option<Value>>;

    /// Load a dataset together with its checksum verdict.
    fn load_verified(&self, id: &str) -> StoreResult<Option<LoadedDataset>>;

    fn exists(&self, id: &str) -> StoreResult<bool>;

    fn metadata(&self, id: &str) -> StoreResult<Option<DatasetMetadata>>;

    /// Stored ids in ascending order.
    fn list(&self) -> StoreResult<Vec<String>>;

    /// URL a dataset stored under `id` is served from.
    fn url(&self, id: &str) -> String;

    /// URL of the dataset stored under `id` when its recorded request equals
    /// `request`; `None` when it is missing or was generated differently.
    fn find_reusable(&self, id: &str, request: &Value) -> StoreResult<Option<String>> {
        if !self.exists(id)? {
            return Ok(None);
        }
        let Some(metadata) = self.metadata(id)? else {
            return Ok(None);
        };
        if metadata.request.as_ref() == Some(request) {
            Ok(Some(self.url(id)))
        } else {
            Ok(None)
        }
    }
}
