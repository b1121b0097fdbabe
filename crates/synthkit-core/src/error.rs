use thiserror::Error;

/// Core error type shared across Synthkit crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller supplied a value outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The business type registry violates internal invariants.
    #[error("invalid registry: {0}")]
    Registry(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by Synthkit crates.
pub type Result<T> = std::result::Result<T, Error>;
