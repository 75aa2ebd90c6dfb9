//! Recorder-internal types: task payloads and lifecycle phases

use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use shared::{ReplayEvent, RunContext, StepEvent};

/// Outcome reported by the test runner for the finished attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Passed,
    Failed,
    Pending,
    Skipped,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Payload of the per-test `dumpEvents` task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpRequest {
    pub id: String,
    pub meta: RunContext,
    #[serde(default)]
    pub cy: Vec<StepEvent>,
    #[serde(default)]
    pub rr: Vec<ReplayEvent>,
    /// Identifier of the staged network archive for this attempt
    #[serde(default)]
    pub har_filename: Option<String>,
    #[serde(default)]
    pub state: TestState,
}

/// Result of handling one finished test attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DumpOutcome {
    Written { path: PathBuf },
    /// Gated out by the failed-attempts-only setting
    Skipped,
}

/// Lifecycle phase of the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Recording,
    /// Assembling the record of a finished attempt; always returns to `Recording`
    Dumping,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Idle => write!(f, "idle"),
            RunPhase::Recording => write!(f, "recording"),
            RunPhase::Dumping => write!(f, "dumping"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dump_request_from_task_payload() {
        let request: DumpRequest = serde_json::from_value(json!({
            "id": "abc",
            "meta": { "spec": "a.cy.ts", "test": ["A", "b"], "retryAttempt": 0 },
            "cy": [],
            "rr": [{ "type": 2 }],
            "harFilename": "abc.har",
            "state": "failed"
        }))
        .unwrap();

        assert_eq!(request.har_filename.as_deref(), Some("abc.har"));
        assert_eq!(request.state, TestState::Failed);
        assert_eq!(request.rr.len(), 1);
    }

    #[test]
    fn test_state_defaults_and_unknown_values() {
        let request: DumpRequest = serde_json::from_value(json!({
            "id": "abc",
            "meta": { "spec": "a.cy.ts", "test": [], "retryAttempt": 0 }
        }))
        .unwrap();
        assert_eq!(request.state, TestState::Unknown);
        assert!(request.har_filename.is_none());

        let state: TestState = serde_json::from_value(json!("flaky")).unwrap();
        assert_eq!(state, TestState::Unknown);
    }
}
