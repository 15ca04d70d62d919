//! Typed error definitions for consolidate.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsolidateError {
    /// The supplied root is missing or not a directory. Fatal.
    #[error("Root is not a valid directory: {0}")]
    InvalidRoot(PathBuf),

    /// The consolidation directory could not be created. Fatal, live runs only.
    #[error("Could not create destination directory {path}: {cause}")]
    DestinationCreateFailed { path: PathBuf, cause: String },

    /// A single candidate could not be moved. Recorded and the run continues.
    #[error("Failed to move {path}: {cause}")]
    MoveFailed { path: PathBuf, cause: String },

    #[error("Invalid file extension filter: '{0}'")]
    InvalidExtension(String),

    #[error("Invalid destination directory name: '{0}'")]
    InvalidDestName(String),
}

impl ConsolidateError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            ConsolidateError::InvalidRoot(_) => 10,
            ConsolidateError::DestinationCreateFailed { .. } => 11,
            ConsolidateError::MoveFailed { .. } => 20,
            ConsolidateError::InvalidExtension(_) => 30,
            ConsolidateError::InvalidDestName(_) => 31,
        }
    }

    /// Whether this error aborts the whole run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConsolidateError::MoveFailed { .. })
    }
}
