//! Capture buffer for browser log entries
//!
//! Log sources append from their own tasks or threads while the lifecycle
//! orchestrator drains at test boundaries. Every clone of a [`CaptureBuffer`]
//! shares the same queue, so a source can be handed a clone and keep
//! appending without knowing when drains happen.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use shared::BrowserLogEntry;

#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    entries: Arc<Mutex<Vec<BrowserLogEntry>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning is ignored: a push never leaves the vector half-written
    fn lock(&self) -> MutexGuard<'_, Vec<BrowserLogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, entry: BrowserLogEntry) {
        self.lock().push(entry);
    }

    /// Take every entry appended so far, in arrival order, leaving the buffer empty
    pub fn drain(&self) -> Vec<BrowserLogEntry> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
