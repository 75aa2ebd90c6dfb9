//! Correlating browser logs with test steps
//!
//! Only the "before" window is defined: every log entry emitted at or before
//! the start of the selected step. Entries are compared by instant, so
//! numeric and textual timestamps mix freely; an entry whose timestamp does
//! not denote an instant never matches.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{BrowserLogs, Timestamp};

use crate::error::ViewerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMode {
    #[default]
    Before,
    After,
}

impl fmt::Display for CorrelationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationMode::Before => write!(f, "before"),
            CorrelationMode::After => write!(f, "after"),
        }
    }
}

impl FromStr for CorrelationMode {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before" => Ok(CorrelationMode::Before),
            "after" => Ok(CorrelationMode::After),
            _ => Err(ViewerError::InvalidCorrelationMode { input: s.to_string() }),
        }
    }
}

fn at_or_before(timestamp: &Timestamp, anchor: DateTime<Utc>) -> bool {
    timestamp.instant().is_some_and(|instant| instant <= anchor)
}

/// Entries of every category emitted at or before `anchor`
///
/// Arrival order is kept within each category. Missing logs or an anchor
/// that is not an instant give an empty window.
pub fn logs_before(logs: Option<&BrowserLogs>, anchor: &Timestamp) -> BrowserLogs {
    let (Some(logs), Some(anchor)) = (logs, anchor.instant()) else {
        return BrowserLogs::default();
    };

    BrowserLogs {
        console: logs
            .console
            .iter()
            .filter(|message| at_or_before(&message.meta.timestamp, anchor))
            .cloned()
            .collect(),
        log_entry: logs
            .log_entry
            .iter()
            .filter(|entry| at_or_before(&entry.timestamp, anchor))
            .cloned()
            .collect(),
        runtime_console_api_called: logs
            .runtime_console_api_called
            .iter()
            .filter(|call| at_or_before(&call.timestamp, anchor))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::BrowserLogEntry;

    fn logs(entries: serde_json::Value) -> BrowserLogs {
        let entries: Vec<BrowserLogEntry> = serde_json::from_value(entries).unwrap();
        BrowserLogs::from_entries(entries)
    }

    fn log_entry(text: &str, timestamp: serde_json::Value) -> serde_json::Value {
        json!({
            "kind": "logEntry",
            "data": { "source": "network", "level": "error", "text": text, "timestamp": timestamp }
        })
    }

    #[test]
    fn test_window_is_inclusive() {
        let logs = logs(json!([
            log_entry("900", json!(900)),
            log_entry("1000", json!(1000)),
            log_entry("1100", json!(1100)),
        ]));

        let window = logs_before(Some(&logs), &Timestamp::from_millis(1000));
        let texts: Vec<_> = window.log_entry.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["900", "1000"]);
    }

    #[test]
    fn test_every_category_is_filtered() {
        let logs = logs(json!([
            { "kind": "console", "data": { "meta": { "timestamp": 10 }, "message": "early" } },
            { "kind": "console", "data": { "meta": { "timestamp": 30 }, "message": "late" } },
            { "kind": "runtimeConsoleApiCalled", "data": {
                "type": "error", "args": [], "executionContextId": 3, "timestamp": 19.5 } },
            { "kind": "runtimeConsoleApiCalled", "data": {
                "type": "log", "args": [], "executionContextId": 3, "timestamp": 20.5 } },
        ]));

        let window = logs_before(Some(&logs), &Timestamp::from_millis(20));
        assert_eq!(window.console.len(), 1);
        assert_eq!(window.console[0].payload["message"], json!("early"));
        assert_eq!(window.runtime_console_api_called.len(), 1);
        assert!(window.log_entry.is_empty());
    }

    #[test]
    fn test_mixed_timestamp_forms() {
        // 2024-03-01T10:00:00Z is 1709287200000 ms
        let logs = logs(json!([
            log_entry("text before", json!("2024-03-01T09:59:59.999Z")),
            log_entry("text after", json!("2024-03-01T10:00:00.001Z")),
            log_entry("millis equal", json!(1_709_287_200_000_i64)),
        ]));

        let window = logs_before(Some(&logs), &Timestamp::Text("2024-03-01T10:00:00Z".to_string()));
        let texts: Vec<_> = window.log_entry.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["text before", "millis equal"]);
    }

    #[test]
    fn test_invalid_timestamps_are_excluded() {
        let logs = logs(json!([
            log_entry("garbage", json!("not a date")),
            log_entry("valid", json!(5)),
        ]));

        let window = logs_before(Some(&logs), &Timestamp::from_millis(10));
        assert_eq!(window.log_entry.len(), 1);

        let invalid_anchor = Timestamp::Text("yesterday".to_string());
        assert!(logs_before(Some(&logs), &invalid_anchor).is_empty());
    }

    #[test]
    fn test_missing_logs_give_empty_window() {
        assert!(logs_before(None, &Timestamp::from_millis(10)).is_empty());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("before".parse::<CorrelationMode>().unwrap(), CorrelationMode::Before);
        assert_eq!(" AFTER ".parse::<CorrelationMode>().unwrap(), CorrelationMode::After);
        assert!(matches!(
            "during".parse::<CorrelationMode>(),
            Err(ViewerError::InvalidCorrelationMode { .. })
        ));
        assert_eq!(CorrelationMode::default().to_string(), "before");
    }
}
