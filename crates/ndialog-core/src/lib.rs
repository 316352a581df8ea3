#![forbid(unsafe_code)]

//! Core: terminal lifecycle, canonical input events, key translation, and
//! text measurement shared by every ndialog crate.

pub mod event;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod measure;
pub mod terminal_session;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
