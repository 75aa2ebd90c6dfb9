//! Main entry point for the viewer binary
//!
//! Prints the ordered steps of an execution record and the browser logs
//! correlated with a selected step, as JSON on stdout.

use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};

use shared::{logging, ExecutionRecord, ProcessId};
use viewer::{load_directory, load_record, CorrelationMode, Timeline};

/// Inspect execution records written by the recorder
#[derive(Parser)]
#[command(name = "viewer")]
#[command(about = "Shows the steps of an execution record and the logs leading up to one of them")]
pub struct Args {
    /// Record file, or a directory of records with --list
    pub path: PathBuf,

    /// Index of the step to correlate (negative clears the selection)
    #[arg(long, allow_hyphen_values = true)]
    pub step: Option<isize>,

    /// Correlation mode (before, after)
    #[arg(long, default_value = "before")]
    pub mode: CorrelationMode,

    /// List the records found below a directory
    #[arg(long)]
    pub list: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn summary(path: &std::path::Path, record: &ExecutionRecord) -> Value {
    json!({
        "path": path.display().to_string(),
        "id": record.id,
        "spec": record.meta.spec,
        "test": record.meta.test_title(),
        "attempt": record.meta.retry_attempt + 1,
        "steps": record.cy.len(),
        "logs": record.browser_logs.len(),
        "networkEntries": record.har.as_ref().map_or(0, |har| har.entry_count()),
    })
}

fn inspect(timeline: &Timeline) -> anyhow::Result<Value> {
    let steps: Vec<Value> = timeline
        .events()
        .iter()
        .enumerate()
        .map(|(index, step)| {
            json!({
                "index": index,
                "timestamp": step.timestamp,
                "wallClockStartedAt": step.started_at(),
            })
        })
        .collect();

    Ok(json!({
        "meta": timeline.meta(),
        "mode": timeline.mode(),
        "steps": steps,
        "selected": timeline.selected_index(),
        "window": timeline.log_window()?,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize process ID singleton for the viewer
    ProcessId::init_viewer();
    logging::init_tracing_with_level(Some(&args.log_level));

    let output = if args.list {
        let records = load_directory(&args.path).await?;
        Value::Array(records.iter().map(|(path, record)| summary(path, record)).collect())
    } else {
        let record = load_record(&args.path).await?;
        let mut timeline = Timeline::from_record(record);
        timeline.set_mode(args.mode);
        if let Some(step) = args.step {
            timeline.select(step);
        }
        inspect(&timeline)?
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
