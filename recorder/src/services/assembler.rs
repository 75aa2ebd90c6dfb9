//! Artifact assembler
//!
//! Combines what the test runner reports for a finished attempt with the
//! logs captured during it and the staged network archive, and writes the
//! resulting execution record as pretty-printed JSON.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::{logging, process_debug, process_warn, ExecutionRecord, ProcessId, RunContext};

use crate::config::RecorderConfig;
use crate::core::naming::{artifact_relative_path, default_artifact_name};
use crate::core::CaptureSession;
use crate::error::RecorderResult;
use crate::services::archive_store::ArchiveStore;
use crate::traits::FileSystem;
use crate::types::DumpRequest;

pub struct ArtifactAssembler<F: FileSystem> {
    file_system: Arc<F>,
    archives: ArchiveStore<F>,
    config: Arc<RecorderConfig>,
}

impl<F: FileSystem> ArtifactAssembler<F> {
    pub fn new(file_system: Arc<F>, config: Arc<RecorderConfig>) -> Self {
        let archives = ArchiveStore::new(Arc::clone(&file_system), config.staging_dir());
        Self {
            file_system,
            archives,
            config,
        }
    }

    pub fn archives(&self) -> &ArchiveStore<F> {
        &self.archives
    }

    /// Name for a record: the configured hook's answer, else the default pattern
    pub fn artifact_name(&self, meta: &RunContext) -> String {
        self.config
            .filename_fn()
            .and_then(|hook| hook(meta))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_artifact_name(meta))
    }

    /// Build and persist the record of one finished attempt
    ///
    /// The session's buffer is drained even when writing fails so that logs
    /// never leak into the next attempt's record.
    pub async fn assemble(
        &self,
        session: &CaptureSession,
        request: DumpRequest,
    ) -> RecorderResult<(PathBuf, ExecutionRecord)> {
        let har = match request.har_filename.as_deref() {
            Some(id) => self.archives.take(id).await,
            None => None,
        };
        let browser_logs = session.drain_logs();

        let record = ExecutionRecord {
            id: request.id,
            meta: request.meta,
            cy: request.cy,
            rr: request.rr,
            har,
            browser_logs,
            plugin_meta: self.config.plugin_meta().cloned(),
        };

        let path = self.write_record(&record).await?;
        self.notify(&path, &record);
        Ok((path, record))
    }

    async fn write_record(&self, record: &ExecutionRecord) -> RecorderResult<PathBuf> {
        let output_dir = self.config.output_dir();
        self.file_system.create_dir_all(output_dir).await?;

        let path = output_dir.join(artifact_relative_path(&self.artifact_name(&record.meta)));
        if let Some(parent) = path.parent().filter(|parent| *parent != output_dir) {
            self.file_system.create_dir_all(parent).await?;
        }

        let content = record.to_pretty_json()?;
        self.file_system.write_file(&path, content.as_bytes()).await?;

        process_debug!(
            ProcessId::current(),
            "💾 Wrote execution record {} ({} steps, {} log entries, archive: {})",
            path.display(),
            record.cy.len(),
            record.browser_logs.len(),
            record.har.is_some()
        );
        Ok(path)
    }

    /// Run the completion callback; its failures stay here
    fn notify(&self, path: &Path, record: &ExecutionRecord) {
        let Some(callback) = self.config.callback() else {
            return;
        };

        match panic::catch_unwind(AssertUnwindSafe(|| callback(path, record))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => logging::log_error(ProcessId::current(), "Completion callback", &e),
            Err(_) => process_warn!(
                ProcessId::current(),
                "⚠️ Completion callback panicked for {}",
                path.display()
            ),
        }
    }
}
