//! Shared types for the browser test telemetry pipeline
//!
//! Contains the data model exchanged between the recorder (which captures and
//! persists one execution record per test attempt) and the viewer (which loads
//! those records back and correlates logs with test steps).

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
