//! Recorder-specific error types

use std::io;
use std::path::Path;
use thiserror::Error;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("File system operation failed: {operation} on {path}")]
    FileSystemError {
        operation: String,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("No capture session is active")]
    NotRecording,

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Host protocol error: {message}")]
    ProtocolError { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RecorderError {
    pub fn file_system(operation: &str, path: &Path, source: io::Error) -> Self {
        RecorderError::FileSystemError {
            operation: operation.to_string(),
            path: path.display().to_string(),
            source,
        }
    }

    pub fn config(field: impl Into<String>) -> Self {
        RecorderError::ConfigurationError { field: field.into() }
    }

    /// True when the error reports a missing file or directory
    pub fn is_not_found(&self) -> bool {
        match self {
            RecorderError::FileSystemError { source, .. } | RecorderError::IoError(source) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

pub type RecorderResult<T> = Result<T, RecorderError>;
