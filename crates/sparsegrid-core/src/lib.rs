#![forbid(unsafe_code)]

//! Core: geometry, animation, timers, gesture input, and logging.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod timer;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, trace_span, warn};
