//! Error types for the converter.

use scel_formats::ScelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting a word list.
#[derive(Debug, Error)]
pub enum MakerError {
    /// The input word list could not be opened or read
    #[error("Failed to open input {path}: {source}")]
    InputOpen {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or moved into place
    #[error("Failed to create output {path}: {source}")]
    OutputCreate {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Encoding the dictionary failed
    #[error(transparent)]
    Format(#[from] ScelError),
}

/// Type alias for converter results.
pub type Result<T> = std::result::Result<T, MakerError>;
