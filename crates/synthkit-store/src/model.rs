use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use crate::errors::{StoreError, StoreResult};

/// Sidecar record kept next to every stored dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub id: String,
    /// SHA-256 hex digest of the stored JSON bytes.
    pub checksum: String,
    pub bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Generation inputs the dataset was produced from; compared before reuse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,
}

impl DatasetMetadata {
    /// Descriptive fields read from a dataset JSON root, when present.
    pub fn describe(dataset: &Value) -> Self {
        Self {
            business_type: dataset
                .get("businessType")
                .and_then(Value::as_str)
                .map(str::to_string),
            stage: dataset.get("stage").and_then(Value::as_str).map(str::to_string),
            seed: dataset.get("seed").and_then(Value::as_i64),
            ..Self::default()
        }
    }

    pub fn with_request(mut self, request: Value) -> Self {
        self.request = Some(request);
        self
    }
}

/// Dataset returned by a verified load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub data: Value,
    pub metadata: Option<DatasetMetadata>,
    /// False when a recorded checksum does not match the stored bytes.
    pub checksum_ok: bool,
}

pub fn checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Wrap a dataset in the `{"data": ...}` envelope served to clients.
pub fn envelope(dataset: Value) -> Value {
    json!({ "data": dataset })
}

pub fn validate_id(id: &str) -> StoreResult<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

/// Canonical bytes of a dataset as stored and checksummed.
pub(crate) fn encode(dataset: &Value) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(dataset)?)
}

pub(crate) fn seal(id: &str, bytes: &[u8], mut metadata: DatasetMetadata) -> DatasetMetadata {
    metadata.id = id.to_string();
    metadata.checksum = checksum(bytes);
    metadata.bytes = bytes.len() as u64;
    metadata
}
