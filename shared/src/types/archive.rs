//! Network archive (HAR) captured for one test attempt
//!
//! The staged document is persisted exactly as the capture plugin wrote it.
//! Entries are read through [`HarEntry`] views whose accessors return `None`
//! for anything missing or of an unexpected shape, so a pending request or
//! an odd status never costs the rest of the archive.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkArchive(Value);

impl NetworkArchive {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `log.entries`, in archive order
    pub fn entries(&self) -> impl Iterator<Item = HarEntry<'_>> {
        self.0
            .pointer("/log/entries")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(HarEntry)
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    /// Entries whose response status is 400 or above
    pub fn failed_requests(&self) -> impl Iterator<Item = HarEntry<'_>> {
        self.entries().filter(|entry| entry.status().is_some_and(|status| status >= 400))
    }
}

/// Read-only view of one request/response pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarEntry<'a>(&'a Value);

impl<'a> HarEntry<'a> {
    pub fn raw(&self) -> &'a Value {
        self.0
    }

    pub fn method(&self) -> Option<&'a str> {
        self.0.pointer("/request/method").and_then(Value::as_str)
    }

    pub fn url(&self) -> Option<&'a str> {
        self.0.pointer("/request/url").and_then(Value::as_str)
    }

    /// Response status; browsers report `-1` or `0` for aborted requests
    pub fn status(&self) -> Option<i64> {
        self.0.pointer("/response/status").and_then(Value::as_i64)
    }
}
