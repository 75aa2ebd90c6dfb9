//! Capture session bound to one test-file run

use chrono::{DateTime, Utc};
use shared::{BrowserLogEntry, BrowserLogs, SessionId};

use super::buffer::CaptureBuffer;

/// Per-run capture state, owned by the lifecycle orchestrator
#[derive(Debug)]
pub struct CaptureSession {
    id: SessionId,
    spec: String,
    started_at: DateTime<Utc>,
    buffer: CaptureBuffer,
}

impl CaptureSession {
    pub fn new(spec: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            spec: spec.into(),
            started_at: Utc::now(),
            buffer: CaptureBuffer::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Append-only handle for asynchronous log sources
    pub fn capture_handle(&self) -> CaptureBuffer {
        self.buffer.clone()
    }

    pub fn append(&self, entry: BrowserLogEntry) {
        self.buffer.append(entry);
    }

    /// Drain everything captured since the previous drain, grouped by category
    pub fn drain_logs(&self) -> BrowserLogs {
        BrowserLogs::from_entries(self.buffer.drain())
    }

    /// Entries captured but not drained yet
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
