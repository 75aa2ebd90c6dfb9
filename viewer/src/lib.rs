//! Viewer library for persisted execution records
//!
//! Orders the step events of a record on a timeline, tracks the selected
//! step and correlates it with the browser logs captured before it.

pub mod correlation;
pub mod error;
pub mod loader;
pub mod timeline;

pub use correlation::{logs_before, CorrelationMode};
pub use error::{ViewerError, ViewerResult};
pub use loader::{load_directory, load_record};
pub use timeline::{order_steps, Timeline};
