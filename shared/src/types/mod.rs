//! Core types used throughout the telemetry pipeline

pub mod archive;
pub mod logs;
pub mod record;
pub mod timestamp;

pub use archive::*;
pub use logs::*;
pub use record::*;
pub use timestamp::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identity reported when a library is used without a binary initializing it
static EMBEDDED: ProcessId = ProcessId::Embedded;

/// Process identifier for any component in the system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Recorder process attached to a test runner
    Recorder,
    /// Viewer process inspecting persisted records
    Viewer,
    /// Library use inside another host (tests, embedding)
    Embedded,
}

impl ProcessId {
    /// Initialize the global process ID for the recorder
    pub fn init_recorder() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Recorder)
    }

    /// Initialize the global process ID for the viewer
    pub fn init_viewer() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Viewer)
    }

    /// Get the global process ID, `Embedded` until a binary initializes it
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&EMBEDDED)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Recorder => write!(f, "recorder"),
            ProcessId::Viewer => write!(f, "viewer"),
            ProcessId::Embedded => write!(f, "embedded"),
        }
    }
}

/// Unique identifier for one capture session (one test-file run)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
