//! Viewer-specific error types

use std::io;
use std::path::Path;
use thiserror::Error;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Correlation mode '{mode}' is not supported")]
    UnsupportedCorrelationMode { mode: String },

    #[error("Unknown correlation mode: {input}")]
    InvalidCorrelationMode { input: String },

    #[error("Failed to read record {path}")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid record {path}: {source}")]
    InvalidRecord {
        path: String,
        #[source]
        source: SharedError,
    },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ViewerError {
    pub fn read(path: &Path, source: io::Error) -> Self {
        ViewerError::ReadError {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn invalid_record(path: &Path, source: SharedError) -> Self {
        ViewerError::InvalidRecord {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type ViewerResult<T> = Result<T, ViewerError>;
