//! End-to-end viewer tests over records on disk

use serde_json::json;
use tempfile::TempDir;

use shared::{BrowserLogs, ExecutionRecord, RunContext, StepEvent, Timestamp};
use viewer::{load_directory, load_record, CorrelationMode, Timeline, ViewerError};

fn step(started_at: &str) -> StepEvent {
    let at = Timestamp::Text(started_at.to_string());
    StepEvent::new(at.clone(), at)
}

fn record() -> ExecutionRecord {
    let browser_logs: BrowserLogs = serde_json::from_value(json!({
        "console": [
            { "meta": { "timestamp": "2024-03-01T10:00:00.500Z" }, "message": "visiting" }
        ],
        "logEntry": [
            { "source": "network", "level": "error", "text": "GET /api 500", "timestamp": 1_709_287_201_500_i64 },
            { "source": "javascript", "level": "error", "text": "late", "timestamp": 1_709_287_210_000_i64 }
        ],
        "runtimeConsoleApiCalled": [
            { "type": "error", "args": [], "executionContextId": 2, "timestamp": 1_709_287_200_100.25 }
        ]
    }))
    .unwrap();

    ExecutionRecord {
        id: "checkout-0".to_string(),
        meta: RunContext::new("checkout.cy.ts", vec!["Checkout".into(), "pays".into()], 0),
        // Out of order on purpose
        cy: vec![
            step("2024-03-01T10:00:05Z"),
            step("2024-03-01T10:00:00Z"),
            step("2024-03-01T10:00:02Z"),
        ],
        rr: Vec::new(),
        har: None,
        browser_logs,
        plugin_meta: None,
    }
}

async fn write_record(dir: &TempDir, name: &str, record: &ExecutionRecord) -> std::path::PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, record.to_pretty_json().unwrap()).await.unwrap();
    path
}

#[tokio::test]
async fn test_walk_through_a_record() {
    let dir = TempDir::new().unwrap();
    let path = write_record(&dir, "checkout.cy.ts_Checkout > pays_1.json", &record()).await;

    let mut timeline = Timeline::from_record(load_record(&path).await.unwrap());
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.meta().map(|m| m.test_title()), Some("Checkout > pays".to_string()));
    assert!(timeline.log_window().unwrap().is_none());

    // Nothing was logged by 10:00:00
    let first = timeline.select_next().unwrap().clone();
    assert_eq!(first.started_at(), &Timestamp::Text("2024-03-01T10:00:00Z".to_string()));
    assert!(timeline.log_window().unwrap().unwrap().is_empty());

    // 10:00:02 sees everything up to the failed request
    timeline.select_next();
    let window = timeline.log_window().unwrap().unwrap();
    assert_eq!(window.console.len(), 1);
    assert_eq!(window.runtime_console_api_called.len(), 1);
    assert_eq!(window.log_entry.len(), 1);
    assert_eq!(window.log_entry[0].text, "GET /api 500");

    // 10:00:05 still precedes the last entry
    timeline.select_next();
    assert_eq!(timeline.log_window().unwrap().unwrap().len(), 3);

    timeline.set_mode(CorrelationMode::After);
    assert!(matches!(
        timeline.log_window(),
        Err(ViewerError::UnsupportedCorrelationMode { .. })
    ));
}

#[tokio::test]
async fn test_reloading_resets_selection() {
    let mut timeline = Timeline::from_record(record());
    timeline.select(1);
    assert!(timeline.selected_step().is_some());

    timeline.load_record(record());
    assert_eq!(timeline.selected_index(), None);
}

#[tokio::test]
async fn test_directory_listing() {
    let dir = TempDir::new().unwrap();
    let mut second = record();
    second.id = "checkout-1".to_string();
    second.meta.retry_attempt = 1;
    write_record(&dir, "b_attempt.json", &second).await;
    write_record(&dir, "a_attempt.json", &record()).await;

    let records = load_directory(dir.path()).await.unwrap();
    let ids: Vec<_> = records.iter().map(|(_, r)| r.id.as_str()).collect();
    assert_eq!(ids, ["checkout-0", "checkout-1"]);
}

#[tokio::test]
async fn test_untimed_entries_load_and_stay_out_of_windows() {
    let dir = TempDir::new().unwrap();
    let mut raw = serde_json::to_value(record()).unwrap();
    raw["browserLogs"]["logEntry"][0]["timestamp"] = json!(null);
    raw["browserLogs"]["console"][0]["meta"] = json!({});
    raw["cy"].as_array_mut().unwrap().push(json!({ "payload": { "name": "then" } }));
    let path = dir.path().join("untimed.json");
    tokio::fs::write(&path, raw.to_string()).await.unwrap();

    let mut timeline = Timeline::from_record(load_record(&path).await.unwrap());
    assert_eq!(timeline.len(), 4);

    // 10:00:05 only sees entries that carry a time
    timeline.select(2);
    let window = timeline.log_window().unwrap().unwrap();
    assert!(window.console.is_empty());
    assert!(window.log_entry.is_empty());
    assert_eq!(window.runtime_console_api_called.len(), 1);

    // The untimed step sorts last and correlates with nothing
    timeline.select(3);
    assert!(timeline.selected_step().unwrap().started_at().instant().is_none());
    assert!(timeline.log_window().unwrap().unwrap().is_empty());
}
