//! Real file system service implementation
//!
//! Thin wrapper over `tokio::fs` that attaches the operation and path to
//! every error and treats removal of an absent target as success.

use std::io::ErrorKind;
use std::path::Path;
use async_trait::async_trait;
use tokio::fs;

use crate::error::{RecorderError, RecorderResult};
use crate::traits::FileSystem;
use shared::{process_debug, ProcessId};

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn create_dir_all(&self, path: &Path) -> RecorderResult<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| RecorderError::file_system("create_dir_all", path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> RecorderResult<()> {
        fs::write(path, contents)
            .await
            .map_err(|e| RecorderError::file_system("write_file", path, e))?;

        process_debug!(ProcessId::current(), "📝 Wrote file: {}", path.display());
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> RecorderResult<Vec<u8>> {
        fs::read(path)
            .await
            .map_err(|e| RecorderError::file_system("read_file", path, e))
    }

    async fn remove_file(&self, path: &Path) -> RecorderResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RecorderError::file_system("remove_file", path, e)),
        }
    }

    async fn remove_dir_all(&self, path: &Path) -> RecorderResult<()> {
        match fs::remove_dir_all(path).await {
            Ok(()) => {
                process_debug!(ProcessId::current(), "🗑️ Removed directory: {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RecorderError::file_system("remove_dir_all", path, e)),
        }
    }
}
