use thiserror::Error;

/// Errors emitted by dataset store backends.
///
/// A store failure never invalidates the in-memory dataset it was given.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid dataset id '{0}': only [a-z0-9-_] are allowed")]
    InvalidId(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;
