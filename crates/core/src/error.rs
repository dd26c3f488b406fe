use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while reading or validating a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error("unsupported artifact format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("model artifact failed validation: {0}")]
    Validation(String),
}

/// Errors raised by a model while scoring a batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("X has {found} features, but {model} is expecting {expected} features as input.")]
    FeatureCountMismatch {
        model: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{model} returned {found} predictions for a batch of {expected}")]
    OutputLength {
        model: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("malformed tree: traversal cannot continue at node {node}")]
    MalformedTree { node: usize },
    #[error("{model} produced a non-finite prediction ({value})")]
    NonFinite { model: &'static str, value: f64 },
}

/// Result alias for artifact operations.
pub type Result<T> = std::result::Result<T, ArtifactError>;
