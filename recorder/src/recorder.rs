//! Lifecycle orchestrator
//!
//! Ties capture to the phases of a test-file run:
//!
//! ```text
//! Idle --on_run_start--> Recording --on_run_end--> Idle
//!                         |     ^
//!          on_test_complete     | record written (or failed)
//!                         v     |
//!                         Dumping
//! ```
//!
//! The recorder owns the capture session for the run; the assembler only
//! borrows it to drain logs.

use std::sync::Arc;

use shared::{logging, process_debug, process_info, process_warn, BrowserLogEntry, ProcessId, SessionId};

use crate::config::RecorderConfig;
use crate::core::{CaptureBuffer, CaptureSession};
use crate::error::{RecorderError, RecorderResult};
use crate::services::ArtifactAssembler;
use crate::traits::FileSystem;
use crate::types::{DumpOutcome, DumpRequest, RunPhase, TestState};

pub struct Recorder<F: FileSystem> {
    config: Arc<RecorderConfig>,
    assembler: ArtifactAssembler<F>,
    session: Option<CaptureSession>,
    phase: RunPhase,
}

impl<F: FileSystem> Recorder<F> {
    /// Create new recorder with an injected file system
    pub fn new(file_system: F, config: RecorderConfig) -> Self {
        let config = Arc::new(config);
        let assembler = ArtifactAssembler::new(Arc::new(file_system), Arc::clone(&config));
        Self {
            config,
            assembler,
            session: None,
            phase: RunPhase::Idle,
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// Buffer handle for asynchronous log sources while a run is recording
    pub fn capture_handle(&self) -> Option<CaptureBuffer> {
        self.session.as_ref().map(CaptureSession::capture_handle)
    }

    /// Start recording for a spec file
    ///
    /// Repeating the call for the spec already being recorded keeps the
    /// current session. A different spec replaces it.
    pub fn on_run_start(&mut self, spec: &str) -> SessionId {
        if let Some(session) = &self.session {
            if session.spec() == spec {
                process_debug!(ProcessId::current(), "Run for {} already recording (session {})", spec, session.id());
                return session.id();
            }
            process_warn!(
                ProcessId::current(),
                "⚠️ Run for {} never ended, discarding session {} with {} pending entries",
                session.spec(),
                session.id(),
                session.pending()
            );
        }

        let session = CaptureSession::new(spec);
        let id = session.id();
        self.session = Some(session);
        self.phase = RunPhase::Recording;

        logging::log_progress(ProcessId::current(), "Recording", spec);
        id
    }

    /// Capture a log entry; returns false when no run is recording
    pub fn record_log(&self, entry: BrowserLogEntry) -> bool {
        match &self.session {
            Some(session) => {
                session.append(entry);
                true
            }
            None => {
                process_debug!(ProcessId::current(), "Dropped {} log entry outside a run", entry.category());
                false
            }
        }
    }

    /// Drop what was captured for the current attempt without writing a record
    ///
    /// Used whenever an attempt ends without being dumped, so its logs never
    /// end up in the next attempt's record. Returns the number of entries dropped.
    pub fn discard_attempt_logs(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.drain_logs().len())
    }

    /// Persist the record of a finished test attempt
    ///
    /// An error only concerns this attempt: the run keeps recording and
    /// later attempts are dumped normally.
    pub async fn on_test_complete(&mut self, request: DumpRequest) -> RecorderResult<DumpOutcome> {
        let Some(session) = self.session.as_ref() else {
            return Err(RecorderError::NotRecording);
        };

        if self.config.failed_tests_only() && request.state != TestState::Failed {
            let discarded = self.discard_attempt_logs();
            process_debug!(
                ProcessId::current(),
                "Skipping record for {} ({:?}), discarded {} log entries",
                request.meta.test_title(),
                request.state,
                discarded
            );
            return Ok(DumpOutcome::Skipped);
        }

        self.phase = RunPhase::Dumping;
        let result = self.assembler.assemble(session, request).await;
        self.phase = RunPhase::Recording;

        match result {
            Ok((path, record)) => {
                process_info!(
                    ProcessId::current(),
                    "📦 Saved record for {} to {}",
                    record.meta.test_title(),
                    path.display()
                );
                Ok(DumpOutcome::Written { path })
            }
            Err(e) => {
                logging::log_error(ProcessId::current(), "Writing execution record", &e);
                Err(e)
            }
        }
    }

    /// Tear down the run: remove staged archives and drop the session
    ///
    /// The recorder is idle afterwards even when removal fails.
    pub async fn on_run_end(&mut self) -> RecorderResult<()> {
        let removal = self.assembler.archives().remove_staging().await;

        if let Some(session) = self.session.take() {
            let pending = session.pending();
            if pending > 0 {
                process_debug!(
                    ProcessId::current(),
                    "Discarding {} undrained entries of session {}",
                    pending,
                    session.id()
                );
            }
            logging::log_progress(ProcessId::current(), "Run finished", session.spec());
        }
        self.phase = RunPhase::Idle;

        removal
    }
}
