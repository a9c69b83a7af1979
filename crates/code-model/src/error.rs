use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, CodeModelError>;

/// Errors raised while loading or indexing a source model
#[derive(Error, Debug)]
pub enum CodeModelError {
    /// Snapshot could not be read
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot is not a valid model document
    #[error("Malformed model snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),

    /// A unit was declared without a name
    #[error("Unit at position {position} has an empty name")]
    EmptyUnitName { position: usize },
}
