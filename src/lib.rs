//! Library exports for the CLI, benchmarks and tests.
/// Application directory resolution.
pub mod app_dirs;
/// Millisecond durations rendered as clock strings.
pub mod clock;
/// Persisted formatting settings.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;

pub use clock::{
    ClockFormatter, ClockParts, ClockStyle, FormatError, format_duration, format_duration_millis,
    format_millis_f64_lossy, try_format_millis_f64,
};
