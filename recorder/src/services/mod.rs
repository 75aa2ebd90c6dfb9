//! Service implementations
//!
//! Components that reach the filesystem, always through the
//! [`FileSystem`](crate::traits::FileSystem) trait.

pub mod archive_store;
pub mod assembler;
pub mod file_system;

#[cfg(test)]
mod tests;

pub use archive_store::ArchiveStore;
pub use assembler::ArtifactAssembler;
pub use file_system::RealFileSystem;
