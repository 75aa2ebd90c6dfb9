//! Execution records: one persisted artifact per test attempt

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::archive::NetworkArchive;
use super::logs::BrowserLogs;
use super::timestamp::Timestamp;
use crate::errors::{SharedError, SharedResult};

/// Identifies the test attempt a record belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunContext {
    /// Spec file the test lives in
    pub spec: String,
    /// Titles from the outermost suite down to the test itself
    pub test: Vec<String>,
    /// Zero-based retry counter
    pub retry_attempt: u32,
}

impl RunContext {
    pub fn new(spec: impl Into<String>, test: Vec<String>, retry_attempt: u32) -> Self {
        Self {
            spec: spec.into(),
            test,
            retry_attempt,
        }
    }

    /// Full test title, suites joined with `" > "`
    pub fn test_title(&self) -> String {
        self.test.join(" > ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    /// Wall-clock start of the step; anchor for log correlation
    #[serde(default)]
    pub wall_clock_started_at: Timestamp,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Test-runner command checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub payload: StepPayload,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StepEvent {
    pub fn new(timestamp: Timestamp, wall_clock_started_at: Timestamp) -> Self {
        Self {
            timestamp,
            payload: StepPayload {
                wall_clock_started_at,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.payload.wall_clock_started_at
    }
}

/// Session-replay event, never interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplayEvent(pub Value);

/// Everything captured for one test attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    pub id: String,
    pub meta: RunContext,
    #[serde(default)]
    pub cy: Vec<StepEvent>,
    #[serde(default)]
    pub rr: Vec<ReplayEvent>,
    #[serde(default)]
    pub har: Option<NetworkArchive>,
    #[serde(default)]
    pub browser_logs: BrowserLogs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_meta: Option<Value>,
}

impl ExecutionRecord {
    pub fn to_pretty_json(&self) -> SharedResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SharedError::SerializationError {
            message: e.to_string(),
        })
    }

    pub fn from_json(content: &str) -> SharedResult<Self> {
        serde_json::from_str(content).map_err(|e| SharedError::DeserializationError {
            message: e.to_string(),
        })
    }
}
