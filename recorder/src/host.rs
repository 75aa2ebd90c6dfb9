//! Host test-runner adapter
//!
//! The test runner talks to the recorder over newline-delimited JSON: each
//! input line is a [`HostEvent`] tagged by its `event` field, and every task
//! (`beforeSpec`, `dumpEvents`, `cleanup`) gets exactly one [`HostReply`]
//! line back. `log` events are fire-and-forget.
//!
//! ```text
//! {"event":"beforeSpec","spec":"login.cy.ts"}
//! {"event":"log","entry":{"kind":"logEntry","data":{...}}}
//! {"event":"dumpEvents","payload":{"id":"...","meta":{...},"cy":[],"rr":[],"harFilename":"..."}}
//! {"event":"cleanup"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use shared::{process_debug, process_warn, BrowserLogEntry, ProcessId};

use crate::error::{RecorderError, RecorderResult};
use crate::recorder::Recorder;
use crate::traits::FileSystem;
use crate::types::{DumpOutcome, DumpRequest};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    /// A spec file is about to run
    BeforeSpec { spec: String },
    /// A browser log entry was captured
    Log { entry: BrowserLogEntry },
    /// A test attempt finished
    DumpEvents { payload: DumpRequest },
    /// The spec file finished
    Cleanup,
    /// Stop serving
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostReply {
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: &dyn std::fmt::Display) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// Counters reported when serving ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    pub events: usize,
    pub logs: usize,
    pub records_written: usize,
    pub failures: usize,
}

/// Apply one host event; returns the reply owed to the host, if any
pub async fn dispatch<F: FileSystem>(
    recorder: &mut Recorder<F>,
    event: HostEvent,
    summary: &mut ServeSummary,
) -> Option<HostReply> {
    match event {
        HostEvent::BeforeSpec { spec } => {
            let session = recorder.on_run_start(&spec);
            Some(HostReply::success(Value::String(session.to_string())))
        }
        HostEvent::Log { entry } => {
            if recorder.record_log(entry) {
                summary.logs += 1;
            }
            None
        }
        HostEvent::DumpEvents { payload } => match recorder.on_test_complete(payload).await {
            Ok(outcome) => {
                if matches!(outcome, DumpOutcome::Written { .. }) {
                    summary.records_written += 1;
                }
                let result = serde_json::to_value(&outcome).unwrap_or(Value::Null);
                Some(HostReply::success(result))
            }
            Err(e) => {
                summary.failures += 1;
                Some(HostReply::failure(&e))
            }
        },
        HostEvent::Cleanup => match recorder.on_run_end().await {
            Ok(()) => Some(HostReply::success(Value::Null)),
            Err(e) => {
                summary.failures += 1;
                Some(HostReply::failure(&e))
            }
        },
        HostEvent::Shutdown => None,
    }
}

/// Handle a line that is not a valid event
///
/// The reply follows the event the line was meant to be: a broken `log` gets
/// none, like any other `log`. A broken `dumpEvents` still ends its attempt,
/// so the logs captured for it are discarded.
fn reject<F: FileSystem>(recorder: &Recorder<F>, line: &str, cause: serde_json::Error) -> Option<HostReply> {
    let error = RecorderError::ProtocolError { message: cause.to_string() };
    let tag = serde_json::from_str::<Value>(line)
        .ok()
        .and_then(|value| value.get("event").and_then(Value::as_str).map(str::to_string));

    match tag.as_deref() {
        Some("log") => {
            process_warn!(ProcessId::current(), "⚠️ Dropped malformed log event: {}", error);
            None
        }
        Some("dumpEvents") => {
            let discarded = recorder.discard_attempt_logs();
            process_warn!(
                ProcessId::current(),
                "⚠️ Rejected dumpEvents payload, discarded {} log entries: {}",
                discarded,
                error
            );
            Some(HostReply::failure(&error))
        }
        _ => {
            process_warn!(ProcessId::current(), "⚠️ {}", error);
            Some(HostReply::failure(&error))
        }
    }
}

async fn write_reply<W: AsyncWrite + Unpin>(writer: &mut W, reply: &HostReply) -> RecorderResult<()> {
    let mut line = serde_json::to_vec(reply)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

/// Serve host events until end of input or a `shutdown` event
///
/// Malformed task lines are answered with an error reply and skipped;
/// malformed `log` lines are only counted. A run still recording when input
/// ends is torn down as if `cleanup` had been sent.
pub async fn serve<F, R, W>(recorder: &mut Recorder<F>, reader: R, mut writer: W) -> RecorderResult<ServeSummary>
where
    F: FileSystem,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = ServeSummary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        summary.events += 1;

        let event = match serde_json::from_str::<HostEvent>(&line) {
            Ok(event) => event,
            Err(e) => {
                summary.failures += 1;
                if let Some(reply) = reject(recorder, &line, e) {
                    write_reply(&mut writer, &reply).await?;
                }
                continue;
            }
        };

        if matches!(event, HostEvent::Shutdown) {
            process_debug!(ProcessId::current(), "Host requested shutdown");
            break;
        }

        if let Some(reply) = dispatch(recorder, event, &mut summary).await {
            write_reply(&mut writer, &reply).await?;
        }
    }

    if recorder.session().is_some() {
        process_warn!(ProcessId::current(), "⚠️ Input ended while recording, cleaning up");
        if let Err(e) = recorder.on_run_end().await {
            summary.failures += 1;
            process_warn!(ProcessId::current(), "⚠️ Cleanup after end of input failed: {}", e);
        }
    }

    Ok(summary)
}
