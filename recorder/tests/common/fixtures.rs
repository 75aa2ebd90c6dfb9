//! Test fixtures and data for recorder tests

use std::path::{Path, PathBuf};
use serde_json::{json, Value};
use shared::{BrowserLogEntry, RunContext, StepEvent, Timestamp};

use recorder::{DumpRequest, TestState};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const SPEC: &'static str = "cypress/e2e/login.cy.ts";
    pub const OTHER_SPEC: &'static str = "cypress/e2e/checkout.cy.ts";
    pub const SUITE: &'static str = "Login";

    pub fn log_entry(text: &str, ms: i64) -> BrowserLogEntry {
        serde_json::from_value(Self::log_entry_json(text, ms)).unwrap()
    }

    pub fn log_entry_json(text: &str, ms: i64) -> Value {
        json!({
            "kind": "logEntry",
            "data": { "source": "javascript", "level": "error", "text": text, "timestamp": ms }
        })
    }

    pub fn console_message(message: &str, ms: i64) -> BrowserLogEntry {
        serde_json::from_value(json!({
            "kind": "console",
            "data": { "meta": { "timestamp": ms }, "type": "warn", "message": message }
        }))
        .unwrap()
    }

    pub fn console_api_call(value: &str, ms: f64) -> BrowserLogEntry {
        serde_json::from_value(json!({
            "kind": "runtimeConsoleApiCalled",
            "data": {
                "type": "log",
                "args": [{ "type": "string", "value": value }],
                "executionContextId": 1,
                "timestamp": ms
            }
        }))
        .unwrap()
    }

    pub fn meta(test: &str, retry_attempt: u32) -> RunContext {
        RunContext::new(Self::SPEC, vec![Self::SUITE.to_string(), test.to_string()], retry_attempt)
    }

    /// Default record path, relative to the output directory, for a test of the standard suite
    pub fn record_path(test: &str, retry_attempt: u32) -> PathBuf {
        Path::new("cypress")
            .join("e2e")
            .join(format!("login.cy.ts_{} > {}_{}.json", Self::SUITE, test, retry_attempt + 1))
    }

    pub fn steps() -> Vec<StepEvent> {
        vec![
            StepEvent::new(Timestamp::from_millis(1_000), Timestamp::from_millis(1_000)),
            StepEvent::new(Timestamp::from_millis(2_000), Timestamp::from_millis(2_000)),
        ]
    }

    pub fn dump_request(test: &str, retry_attempt: u32, state: TestState) -> DumpRequest {
        DumpRequest {
            id: format!("{test}-{retry_attempt}"),
            meta: Self::meta(test, retry_attempt),
            cy: Self::steps(),
            rr: Vec::new(),
            har_filename: Some(format!("{test}-{retry_attempt}.har")),
            state,
        }
    }

    pub fn har_json(url: &str) -> String {
        json!({
            "log": {
                "version": "1.2",
                "creator": { "name": "capture", "version": "1.0" },
                "pages": [],
                "entries": [{
                    "startedDateTime": "2024-03-01T10:00:00.000Z",
                    "time": 30.0,
                    "request": { "method": "POST", "url": url },
                    "response": { "status": 500 }
                }]
            }
        })
        .to_string()
    }
}
