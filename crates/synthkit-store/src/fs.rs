use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::DatasetStore;
use crate::atomic::write_bytes_atomic;
use crate::errors::StoreResult;
use crate::model::{DatasetMetadata, LoadedDataset, checksum, encode, seal, validate_id};

const DATA_SUFFIX: &str = ".json";
const META_SUFFIX: &str = ".meta.json";

/// Stores each dataset as `<root>/<id>.json` with a `<id>.meta.json`
/// checksum sidecar.
#[derive(Debug, Clone)]
pub struct FsDatasetStore {
    root: PathBuf,
    base_url: String,
}

impl FsDatasetStore {
    /// Store rooted at `root`; URLs use the `file://` scheme.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let base_url = format!("file://{}", root.display());
        Self { root, base_url }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}{DATA_SUFFIX}"))
    }

    pub fn metadata_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}{META_SUFFIX}"))
    }

    fn read_metadata(&self, id: &str) -> StoreResult<Option<DatasetMetadata>> {
        match std::fs::read(self.metadata_path(id)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl DatasetStore for FsDatasetStore {
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

        write_bytes_atomic(&self.data_path(id), &bytes)?;
        write_bytes_atomic(&self.metadata_path(id), &serde_json::to_vec_pretty(&metadata)?)?;

        info!(
            event = "dataset_saved",
            id,
            bytes = metadata.bytes,
            checksum = %metadata.checksum,
            "dataset saved"
        );
        Ok(self.url(id))
    }

    fn load(&self, id: &str) -> StoreResult<Option<Value>> {
        Ok(self.load_verified(id)?.map(|loaded| loaded.data))
    }

    fn load_verified(&self, id: &str) -> StoreResult<Option<LoadedDataset>> {
        validate_id(id)?;
        let bytes = match std::fs::read(self.data_path(id)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(event = "dataset_missing", id, "dataset not found");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let data: Value = serde_json::from_slice(&bytes)?;
        let metadata = self.read_metadata(id)?;

        let checksum_ok = match &metadata {
            Some(metadata) => {
                let actual = checksum(&bytes);
                if actual != metadata.checksum {
                    warn!(
                        event = "checksum_mismatch",
                        id,
                        expected = %metadata.checksum,
                        actual = %actual,
                        "stored dataset does not match its checksum"
                    );
                    false
                } else {
                    true
                }
            }
            None => {
                warn!(event = "metadata_missing", id, "dataset has no checksum sidecar");
                true
            }
        };

        Ok(Some(LoadedDataset {
            data,
            metadata,
            checksum_ok,
        }))
    }

    fn exists(&self, id: &str) -> StoreResult<bool> {
        validate_id(id)?;
        Ok(self.data_path(id).is_file())
    }

    fn metadata(&self, id: &str) -> StoreResult<Option<DatasetMetadata>> {
        validate_id(id)?;
        self.read_metadata(id)
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(META_SUFFIX) {
                continue;
            }
            if let Some(id) = name.strip_suffix(DATA_SUFFIX) {
                if validate_id(id).is_ok() {
                    ids.push(id.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn url(&self, id: &str) -> String {
        format!("{}/{id}{DATA_SUFFIX}", self.base_url.trim_end_matches('/'))
    }
}
