//! Timeline and selection model
//!
//! Holds the step events of one record ordered by timestamp, a selection
//! cursor over them, and the browser logs the selected step is correlated
//! with. Replacing the events always clears the selection, so a cursor never
//! points into a sequence it was not made for.

use std::cmp::Ordering;

use shared::{process_debug, BrowserLogs, ExecutionRecord, ProcessId, RunContext, StepEvent};

use crate::correlation::{logs_before, CorrelationMode};
use crate::error::{ViewerError, ViewerResult};

/// Sort steps ascending by timestamp
///
/// The sort is stable. Steps whose timestamp is not an instant go last, in
/// their original order.
pub fn order_steps(events: Vec<StepEvent>) -> Vec<StepEvent> {
    let mut keyed: Vec<_> = events
        .into_iter()
        .map(|event| (event.timestamp.instant(), event))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, event)| event).collect()
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<StepEvent>,
    selected: Option<usize>,
    mode: CorrelationMode,
    meta: Option<RunContext>,
    browser_logs: Option<BrowserLogs>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline over a persisted record
    pub fn from_record(record: ExecutionRecord) -> Self {
        let mut timeline = Self::new();
        timeline.load_record(record);
        timeline
    }

    /// Replace the steps; the selection is reset
    pub fn set_events(&mut self, events: Vec<StepEvent>) {
        self.events = order_steps(events);
        self.selected = None;
        process_debug!(ProcessId::current(), "Timeline holds {} steps", self.events.len());
    }

    /// Steps in display order
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Move the cursor; negative or out-of-range indices clear it
    pub fn select(&mut self, index: isize) {
        self.selected = usize::try_from(index).ok().filter(|&i| i < self.events.len());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_step(&self) -> Option<&StepEvent> {
        self.selected.and_then(|index| self.events.get(index))
    }

    /// Select the following step, or the first one when nothing is selected
    pub fn select_next(&mut self) -> Option<&StepEvent> {
        if self.events.is_empty() {
            return None;
        }
        let next = match self.selected {
            Some(index) => (index + 1).min(self.events.len() - 1),
            None => 0,
        };
        self.selected = Some(next);
        self.selected_step()
    }

    /// Select the preceding step, or the last one when nothing is selected
    pub fn select_previous(&mut self) -> Option<&StepEvent> {
        if self.events.is_empty() {
            return None;
        }
        let previous = match self.selected {
            Some(index) => index.saturating_sub(1),
            None => self.events.len() - 1,
        };
        self.selected = Some(previous);
        self.selected_step()
    }

    pub fn mode(&self) -> CorrelationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CorrelationMode) {
        self.mode = mode;
    }

    pub fn meta(&self) -> Option<&RunContext> {
        self.meta.as_ref()
    }

    pub fn set_meta(&mut self, meta: RunContext) {
        self.meta = Some(meta);
    }

    pub fn browser_logs(&self) -> Option<&BrowserLogs> {
        self.browser_logs.as_ref()
    }

    pub fn set_browser_logs(&mut self, logs: BrowserLogs) {
        self.browser_logs = Some(logs);
    }

    /// Show a record: its steps, meta and browser logs at once
    pub fn load_record(&mut self, record: ExecutionRecord) {
        self.set_meta(record.meta);
        self.set_browser_logs(record.browser_logs);
        self.set_events(record.cy);
    }

    /// Logs correlated with the selected step
    ///
    /// `Ok(None)` when no step is selected. A selected step without loaded
    /// logs gives an empty window.
    pub fn log_window(&self) -> ViewerResult<Option<BrowserLogs>> {
        let Some(step) = self.selected_step() else {
            return Ok(None);
        };

        match self.mode {
            CorrelationMode::Before => Ok(Some(logs_before(self.browser_logs.as_ref(), step.started_at()))),
            CorrelationMode::After => Err(ViewerError::UnsupportedCorrelationMode {
                mode: self.mode.to_string(),
            }),
        }
    }
}
