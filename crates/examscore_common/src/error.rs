//! Error taxonomy for prediction and artifact handling

use std::path::PathBuf;

/// Outcome of a rejected prediction. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter valid numeric values for all fields.")]
    NotNumeric { fields: Vec<&'static str> },

    #[error("Please enter values within the valid ranges.")]
    OutOfRange { fields: Vec<&'static str> },

    /// A field was absent from the submission altogether
    #[error("An error occurred while processing your request.")]
    MissingField { fields: Vec<&'static str> },

    #[error("An error occurred while processing your request.")]
    ProcessingFailed(#[source] ArtifactError),
}

impl ValidationError {
    /// Stable tag for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::NotNumeric { .. } => "not_numeric",
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::ProcessingFailed(_) => "processing_failed",
        }
    }
}

/// Errors raised while loading or applying a fitted artifact
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode artifact {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{what} has {actual} values, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} contains a non-finite value")]
    NonFinite { what: &'static str },
}
