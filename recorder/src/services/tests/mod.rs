//! Service-specific tests
//!
//! The archive store and the assembler are exercised against temporary
//! directories through `RealFileSystem`, and against `MockFileSystem` where
//! a failure has to be injected.


// Common test utilities for services
#[cfg(test)]
pub mod common {
    use serde_json::json;
    use shared::{BrowserLogEntry, RunContext};

    use crate::types::{DumpRequest, TestState};

    /// Minimal network archive as staged by the capture plugin
    pub fn har_json(urls: &[&str]) -> String {
        let entries: Vec<_> = urls
            .iter()
            .map(|url| {
                json!({
                    "startedDateTime": "2024-03-01T10:00:00.000Z",
                    "time": 12.5,
                    "request": { "method": "GET", "url": url },
                    "response": { "status": 200 }
                })
            })
            .collect();
        json!({
            "log": {
                "version": "1.2",
                "creator": { "name": "capture", "version": "1.0" },
                "pages": [],
                "entries": entries
            }
        })
        .to_string()
    }

    pub fn log_entry(text: &str, ms: i64) -> BrowserLogEntry {
        serde_json::from_value(json!({
            "kind": "logEntry",
            "data": { "source": "javascript", "level": "error", "text": text, "timestamp": ms }
        }))
        .expect("valid log entry")
    }

    pub fn request(test: &[&str], retry_attempt: u32, har_filename: Option<&str>) -> DumpRequest {
        DumpRequest {
            id: format!("{}-{}", test.join("-"), retry_attempt),
            meta: RunContext::new("login.cy.ts", test.iter().map(|t| t.to_string()).collect(), retry_attempt),
            cy: Vec::new(),
            rr: Vec::new(),
            har_filename: har_filename.map(str::to_string),
            state: TestState::Failed,
        }
    }
}
