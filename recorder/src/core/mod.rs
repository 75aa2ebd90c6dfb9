//! Core capture state
//!
//! In-memory structures with no I/O: the shared log buffer, the per-run
//! capture session and artifact naming rules.

pub mod buffer;
pub mod naming;
pub mod session;

pub use buffer::CaptureBuffer;
pub use session::CaptureSession;
