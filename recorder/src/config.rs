//! Recorder configuration
//!
//! Options are collected through [`RecorderConfigBuilder`] (from code, the
//! environment or CLI flags) and resolved once by [`RecorderConfigBuilder::build`]:
//! paths become absolute and the output directory is chosen there, so the
//! assembler never re-derives them per test.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use shared::{process_warn, ExecutionRecord, ProcessId, RunContext};

use crate::error::{RecorderError, RecorderResult};

/// Directory the network-capture plugin stages archives in
pub const DEFAULT_STAGING_DIR: &str = "dump_har";

/// Output directory used when none (or an unusable one) is configured
pub const DEFAULT_OUTPUT_DIR: &str = "dump";

/// Filename override; `None` falls back to the default name
pub type FilenameFn = Arc<dyn Fn(&RunContext) -> Option<String> + Send + Sync>;

/// Invoked after each record is written
pub type CompletionCallback = Arc<dyn Fn(&Path, &ExecutionRecord) -> anyhow::Result<()> + Send + Sync>;

pub const ENV_TARGET_DIR: &str = "RECORDER_TARGET_DIR";
pub const ENV_STAGING_DIR: &str = "RECORDER_STAGING_DIR";
pub const ENV_FAILED_ONLY: &str = "RECORDER_FAILED_ONLY";
pub const ENV_PLUGIN_META: &str = "RECORDER_PLUGIN_META";

/// Resolved recorder configuration
#[derive(Clone)]
pub struct RecorderConfig {
    staging_dir: PathBuf,
    output_dir: PathBuf,
    filename_fn: Option<FilenameFn>,
    callback: Option<CompletionCallback>,
    failed_tests_only: bool,
    plugin_meta: Option<Value>,
}

impl RecorderConfig {
    pub fn builder() -> RecorderConfigBuilder {
        RecorderConfigBuilder::new()
    }

    /// Absolute staging directory for network archives
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Absolute directory execution records are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn filename_fn(&self) -> Option<&FilenameFn> {
        self.filename_fn.as_ref()
    }

    pub fn callback(&self) -> Option<&CompletionCallback> {
        self.callback.as_ref()
    }

    pub fn failed_tests_only(&self) -> bool {
        self.failed_tests_only
    }

    pub fn plugin_meta(&self) -> Option<&Value> {
        self.plugin_meta.as_ref()
    }
}

impl fmt::Debug for RecorderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecorderConfig")
            .field("staging_dir", &self.staging_dir)
            .field("output_dir", &self.output_dir)
            .field("filename_fn", &self.filename_fn.is_some())
            .field("callback", &self.callback.is_some())
            .field("failed_tests_only", &self.failed_tests_only)
            .field("plugin_meta", &self.plugin_meta)
            .finish()
    }
}

pub struct RecorderConfigBuilder {
    working_dir: Option<PathBuf>,
    staging_dir: PathBuf,
    default_output_dir: PathBuf,
    target_directory: Option<PathBuf>,
    filename_fn: Option<FilenameFn>,
    callback: Option<CompletionCallback>,
    failed_tests_only: bool,
    plugin_meta: Option<Value>,
}

impl Default for RecorderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderConfigBuilder {
    pub fn new() -> Self {
        Self {
            working_dir: None,
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            default_output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            target_directory: None,
            filename_fn: None,
            callback: None,
            failed_tests_only: false,
            plugin_meta: None,
        }
    }

    /// Directory relative paths are resolved against (defaults to the current directory)
    pub fn working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn staging_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn default_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.default_output_dir = dir.into();
        self
    }

    /// Requested output directory; ignored when it is the staging directory
    pub fn target_directory<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.target_directory = Some(dir.into());
        self
    }

    pub fn filename_fn<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RunContext) -> Option<String> + Send + Sync + 'static,
    {
        self.filename_fn = Some(Arc::new(hook));
        self
    }

    pub fn callback<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &ExecutionRecord) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(hook));
        self
    }

    pub fn failed_tests_only(mut self, enabled: bool) -> Self {
        self.failed_tests_only = enabled;
        self
    }

    pub fn plugin_meta(mut self, meta: Value) -> Self {
        self.plugin_meta = Some(meta);
        self
    }

    /// Apply `RECORDER_*` environment overrides
    pub fn from_env(self) -> RecorderResult<Self> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the process environment in production)
    pub fn apply_env<L>(mut self, lookup: L) -> RecorderResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_TARGET_DIR) {
            self.target_directory = Some(PathBuf::from(dir));
        }
        if let Some(dir) = lookup(ENV_STAGING_DIR).filter(|d| !d.trim().is_empty()) {
            self.staging_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(ENV_FAILED_ONLY) {
            self.failed_tests_only = parse_flag(&flag)
                .ok_or_else(|| RecorderError::config(format!("{ENV_FAILED_ONLY}={flag} is not a boolean")))?;
        }
        if let Some(raw) = lookup(ENV_PLUGIN_META) {
            let meta = serde_json::from_str(&raw)
                .map_err(|e| RecorderError::config(format!("{ENV_PLUGIN_META} is not valid JSON: {e}")))?;
            self.plugin_meta = Some(meta);
        }
        Ok(self)
    }

    pub fn build(self) -> RecorderResult<RecorderConfig> {
        let cwd = std::env::current_dir()
            .map_err(|e| RecorderError::config(format!("working directory unavailable: {e}")))?;
        let working_dir = match self.working_dir {
            Some(dir) => normalize_path(&cwd, &dir),
            None => cwd,
        };

        let staging_dir = normalize_path(&working_dir, &self.staging_dir);
        let default_output_dir = normalize_path(&working_dir, &self.default_output_dir);

        let output_dir = match self.target_directory.filter(|dir| !dir.as_os_str().is_empty()) {
            Some(target) => {
                let target = normalize_path(&working_dir, &target);
                if target == staging_dir {
                    process_warn!(
                        ProcessId::current(),
                        "⚠️ Target directory {} is the archive staging directory, writing to {} instead",
                        target.display(),
                        default_output_dir.display()
                    );
                    default_output_dir
                } else {
                    target
                }
            }
            None => default_output_dir,
        };

        Ok(RecorderConfig {
            staging_dir,
            output_dir,
            filename_fn: self.filename_fn,
            callback: self.callback,
            failed_tests_only: self.failed_tests_only,
            plugin_meta: self.plugin_meta,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Absolute, lexically normalized form of `path` (`.` and `..` folded)
///
/// Symlinks are not resolved: the directories involved usually do not exist
/// yet when the configuration is built.
pub fn normalize_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
