//! Trait definitions with mockall annotations for testing
//!
//! The filesystem is the recorder's only external collaborator. Keeping it
//! behind a trait lets the archive store and the assembler be exercised
//! against temporary directories or against mocks that inject failures.

use std::path::Path;
use crate::error::RecorderResult;

/// File system abstraction for dependency injection
///
/// Removal operations succeed when the target is already absent, and
/// `read_file` reports a missing file through an error for which
/// [`RecorderError::is_not_found`](crate::error::RecorderError::is_not_found)
/// holds.
#[mockall::automock]
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync {
    /// Create a directory and all of its parents; existing directories are fine
    async fn create_dir_all(&self, path: &Path) -> RecorderResult<()>;

    /// Create or truncate a file and write `contents` to it
    async fn write_file(&self, path: &Path, contents: &[u8]) -> RecorderResult<()>;

    /// Read a whole file
    async fn read_file(&self, path: &Path) -> RecorderResult<Vec<u8>>;

    /// Remove a single file
    async fn remove_file(&self, path: &Path) -> RecorderResult<()>;

    /// Remove a directory recursively
    async fn remove_dir_all(&self, path: &Path) -> RecorderResult<()>;
}
