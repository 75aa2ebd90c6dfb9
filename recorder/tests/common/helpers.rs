//! Test helpers and builder patterns for recorder tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use recorder::{FileSystem, MockFileSystem, RealFileSystem, Recorder, RecorderConfig, RecorderConfigBuilder, RunPhase};
use shared::ExecutionRecord;

/// Builder for recorders working inside a temporary directory
pub struct RecorderBuilder {
    dir: TempDir,
    config: RecorderConfigBuilder,
}

impl RecorderBuilder {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = RecorderConfig::builder().working_dir(dir.path());
        Self { dir, config }
    }

    /// Adjust the configuration before it is built
    pub fn with_config<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(RecorderConfigBuilder) -> RecorderConfigBuilder,
    {
        self.config = setup(self.config);
        self
    }

    pub fn failed_only(self) -> Self {
        self.with_config(|config| config.failed_tests_only(true))
    }

    pub fn build(self) -> TestRecorder {
        let config = self.config.build().unwrap();
        TestRecorder {
            recorder: Recorder::new(RealFileSystem::new(), config),
            dir: self.dir,
        }
    }
}

impl Default for RecorderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A recorder on the real filesystem plus the directory it lives in
pub struct TestRecorder {
    pub recorder: Recorder<RealFileSystem>,
    pub dir: TempDir,
}

impl TestRecorder {
    pub fn staging_dir(&self) -> PathBuf {
        self.recorder.config().staging_dir().to_path_buf()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.recorder.config().output_dir().to_path_buf()
    }

    /// Stage a network archive the way the capture plugin does
    pub async fn stage_archive(&self, id: &str, content: &str) {
        let staging = self.staging_dir();
        tokio::fs::create_dir_all(&staging).await.unwrap();
        tokio::fs::write(staging.join(id), content).await.unwrap();
    }

    pub async fn read_record(&self, relative: &Path) -> ExecutionRecord {
        let content = tokio::fs::read_to_string(self.output_dir().join(relative)).await.unwrap();
        ExecutionRecord::from_json(&content).unwrap()
    }

    /// Every record file under the output directory, relative and sorted
    pub fn record_files(&self) -> Vec<PathBuf> {
        let root = self.output_dir();
        let mut files = Vec::new();
        let mut pending = vec![root.clone()];
        while let Some(dir) = pending.pop() {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    pending.push(path);
                } else {
                    files.push(path.strip_prefix(&root).unwrap().to_path_buf());
                }
            }
        }
        files.sort();
        files
    }
}

pub struct TestHelpers;

impl TestHelpers {
    /// Recorder over a mocked file system, resolving paths against `/work`
    pub fn mock_recorder<F>(setup: F) -> Recorder<MockFileSystem>
    where
        F: FnOnce(&mut MockFileSystem),
    {
        let mut file_system = MockFileSystem::new();
        setup(&mut file_system);
        let config = RecorderConfig::builder().working_dir("/work").build().unwrap();
        Recorder::new(file_system, config)
    }

    pub fn assert_idle<F: FileSystem>(recorder: &Recorder<F>) {
        assert_eq!(recorder.phase(), RunPhase::Idle);
        assert!(recorder.session().is_none());
        assert!(recorder.capture_handle().is_none());
    }
}
