//! Error types for importing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while importing a model.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the model file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model data could not be decoded.
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: prm_decode::DecodeError,
    },

    /// No registered importer accepts the file name.
    #[error("no importer for {0}")]
    UnsupportedFormat(String),
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, Error>;
