//! Recorder library for capturing browser test telemetry
//!
//! Buffers browser log entries while a spec file runs and, for every finished
//! test attempt, assembles the captured logs, the staged network archive and
//! the runner's step and replay events into one execution record on disk.

pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod recorder;
pub mod services;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{RecorderConfig, RecorderConfigBuilder};
pub use core::{CaptureBuffer, CaptureSession};
pub use error::{RecorderError, RecorderResult};
pub use recorder::Recorder;
pub use services::{ArchiveStore, ArtifactAssembler, RealFileSystem};
pub use traits::{FileSystem, MockFileSystem};
pub use types::{DumpOutcome, DumpRequest, RunPhase, TestState};
