//! Study Buddy Application
//!
//! Headless shell around the dashboard engine: loads configuration, replays
//! recorded pointer traces, and reports the resulting layout.

mod app;
mod trace;

pub use app::{App, AppConfig, AppError, Report, load_trace, run};
pub use trace::{Trace, TraceStep};
