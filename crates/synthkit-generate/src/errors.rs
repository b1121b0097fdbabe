use thiserror::Error;

/// Errors emitted by the generation engine.
///
/// Unknown business types and zero counts are not errors; they resolve to
/// the default profile and empty pools.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Caller contract violation, e.g. a negative record count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A dependent pool was requested while its parent pool is empty.
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
    #[error("core error: {0}")]
    Core(#[from] synthkit_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
