//! Browser log entries captured over the Chrome DevTools Protocol
//!
//! Three independent sources feed the capture buffer: console messages
//! reported by the test runner, `Log.entryAdded` entries and
//! `Runtime.consoleAPICalled` calls. They are kept apart in persisted records
//! because each one is timestamped by its own clock.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEntryLevel {
    Verbose,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEntrySource {
    Xml,
    Javascript,
    Network,
    Storage,
    Appcache,
    Rendering,
    Security,
    Deprecation,
    Worker,
    Violation,
    Intervention,
    Recommendation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEntryCategory {
    Cors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCallFrame {
    pub function_name: String,
    pub script_id: String,
    pub url: String,
    pub line_number: i64,
    pub column_number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStackTraceId {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debugger_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStackTrace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub call_frames: Vec<RuntimeCallFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<RuntimeStackTrace>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RuntimeStackTraceId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteObjectType {
    Object,
    Function,
    Undefined,
    String,
    Number,
    Boolean,
    Symbol,
    Bigint,
}

/// Mirror of a JavaScript value; protocol fields beyond type and description
/// (value, subtype, preview...) are preserved untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeRemoteObject {
    #[serde(rename = "type")]
    pub kind: RemoteObjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `Log.entryAdded` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub source: LogEntrySource,
    pub level: LogEntryLevel,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LogEntryCategory>,
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<RuntimeStackTrace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<RuntimeRemoteObject>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsoleApiType {
    Log,
    Debug,
    Info,
    Error,
    Warning,
    Dir,
    Dirxml,
    Table,
    Trace,
    Clear,
    StartGroup,
    StartGroupCollapsed,
    EndGroup,
    Assert,
    Profile,
    ProfileEnd,
    Count,
    TimeEnd,
}

/// `Runtime.consoleAPICalled` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConsoleApiCalled {
    #[serde(rename = "type")]
    pub kind: ConsoleApiType,
    pub args: Vec<RuntimeRemoteObject>,
    pub execution_context_id: i64,
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<RuntimeStackTrace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleMeta {
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Console message as reported by the test runner; only `meta.timestamp`
/// is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    #[serde(default)]
    pub meta: ConsoleMeta,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Independent log categories, each persisted as its own list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    Console,
    LogEntry,
    RuntimeConsoleApiCalled,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogCategory::Console => write!(f, "console"),
            LogCategory::LogEntry => write!(f, "logEntry"),
            LogCategory::RuntimeConsoleApiCalled => write!(f, "runtimeConsoleApiCalled"),
        }
    }
}

/// One captured log entry from any source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum BrowserLogEntry {
    Console(ConsoleMessage),
    LogEntry(LogEntry),
    RuntimeConsoleApiCalled(RuntimeConsoleApiCalled),
}

impl BrowserLogEntry {
    pub fn category(&self) -> LogCategory {
        match self {
            BrowserLogEntry::Console(_) => LogCategory::Console,
            BrowserLogEntry::LogEntry(_) => LogCategory::LogEntry,
            BrowserLogEntry::RuntimeConsoleApiCalled(_) => LogCategory::RuntimeConsoleApiCalled,
        }
    }

    pub fn timestamp(&self) -> &Timestamp {
        match self {
            BrowserLogEntry::Console(message) => &message.meta.timestamp,
            BrowserLogEntry::LogEntry(entry) => &entry.timestamp,
            BrowserLogEntry::RuntimeConsoleApiCalled(call) => &call.timestamp,
        }
    }
}

impl From<LogEntry> for BrowserLogEntry {
    fn from(entry: LogEntry) -> Self {
        BrowserLogEntry::LogEntry(entry)
    }
}

impl From<RuntimeConsoleApiCalled> for BrowserLogEntry {
    fn from(call: RuntimeConsoleApiCalled) -> Self {
        BrowserLogEntry::RuntimeConsoleApiCalled(call)
    }
}

impl From<ConsoleMessage> for BrowserLogEntry {
    fn from(message: ConsoleMessage) -> Self {
        BrowserLogEntry::Console(message)
    }
}

/// Browser logs grouped by category, as persisted in an execution record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserLogs {
    #[serde(default)]
    pub console: Vec<ConsoleMessage>,
    #[serde(default)]
    pub log_entry: Vec<LogEntry>,
    #[serde(default)]
    pub runtime_console_api_called: Vec<RuntimeConsoleApiCalled>,
}

impl BrowserLogs {
    /// Group drained entries by category; arrival order is kept per category
    pub fn from_entries(entries: impl IntoIterator<Item = BrowserLogEntry>) -> Self {
        let mut logs = Self::default();
        for entry in entries {
            logs.push(entry);
        }
        logs
    }

    pub fn push(&mut self, entry: BrowserLogEntry) {
        match entry {
            BrowserLogEntry::Console(message) => self.console.push(message),
            BrowserLogEntry::LogEntry(entry) => self.log_entry.push(entry),
            BrowserLogEntry::RuntimeConsoleApiCalled(call) => {
                self.runtime_console_api_called.push(call)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.console.len() + self.log_entry.len() + self.runtime_console_api_called.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
