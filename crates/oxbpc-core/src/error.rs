//! Error types for the collaborator interfaces

use thiserror::Error;

/// Result type for transform engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors a [`TransformEngine`](crate::TransformEngine) reports back to the estimators
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    /// An auxiliary profile (such as the Lab connection space) could not be built
    #[error("Profile creation failed: {0}")]
    ProfileCreation(String),

    /// The transform chain could not be linked
    #[error("Transform error: {0}")]
    Transform(String),

    /// The sample buffers do not match the transform's formats
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Sample format not accepted by the transform
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}
