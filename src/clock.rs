//! Millisecond durations rendered as compact clock strings.
//!
//! The default rendering is unpadded: `65_000` ms reads `1:5`, one hour
//! reads `1:0:0`. [`ClockStyle::Padded`] zero-pads minutes and seconds for
//! displays that expect `1:05`.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Upper bound (exclusive) for floating-point inputs, i.e. 2^64.
const F64_MILLIS_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Padding policy for rendered clock strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStyle {
    /// Plain decimal components, e.g. `1:5` or `1:0:0`.
    #[default]
    Unpadded,
    /// Minutes and seconds zero-padded to two digits, e.g. `1:05` or `1:00:00`.
    Padded,
}

/// Rejected floating-point duration inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FormatError {
    /// Input was NaN or infinite.
    #[error("Duration is not a finite number: {0}")]
    NotFinite(f64),
    /// Input was below zero.
    #[error("Duration must not be negative: {0} ms")]
    Negative(f64),
    /// Input does not fit in a `u64` millisecond count.
    #[error("Duration exceeds the supported range: {0} ms")]
    OutOfRange(f64),
}

/// Whole hours, minutes and seconds of a duration; sub-second remainder dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockParts {
    pub hours: u64,
    /// Always in `0..60`.
    pub minutes: u64,
    /// Always in `0..60`.
    pub seconds: u64,
}

impl ClockParts {
    /// Split a millisecond count into clock components.
    pub fn from_millis(millis: u64) -> Self {
        let hours = millis / MILLIS_PER_HOUR;
        let remainder = millis - hours * MILLIS_PER_HOUR;
        let minutes = remainder / MILLIS_PER_MINUTE;
        let remainder = remainder - minutes * MILLIS_PER_MINUTE;
        let seconds = remainder / MILLIS_PER_SECOND;
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Split a [`Duration`], saturating past `u64::MAX` milliseconds.
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_millis(duration_to_millis(duration))
    }

    /// Milliseconds represented by the components (the start of the one-second bucket).
    pub fn to_millis(&self) -> u64 {
        self.hours
            .saturating_mul(MILLIS_PER_HOUR)
            .saturating_add(self.minutes * MILLIS_PER_MINUTE)
            .saturating_add(self.seconds * MILLIS_PER_SECOND)
    }

    /// True when the duration spans at least one hour.
    pub fn has_hours(&self) -> bool {
        self.hours > 0
    }

    /// Render with the given padding policy.
    pub fn render(&self, style: ClockStyle) -> String {
        let Self {
            hours,
            minutes,
            seconds,
        } = *self;
        match (style, self.has_hours()) {
            (ClockStyle::Unpadded, true) => format!("{hours}:{minutes}:{seconds}"),
            (ClockStyle::Unpadded, false) => format!("{minutes}:{seconds}"),
            (ClockStyle::Padded, true) => format!("{hours}:{minutes:02}:{seconds:02}"),
            (ClockStyle::Padded, false) => format!("{minutes}:{seconds:02}"),
        }
    }
}

impl fmt::Display for ClockParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_hours() {
            write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
        } else {
            write!(f, "{}:{}", self.minutes, self.seconds)
        }
    }
}

/// Formats durations with a fixed [`ClockStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockFormatter {
    style: ClockStyle,
}

impl ClockFormatter {
    /// Formatter that renders with `style`.
    pub fn new(style: ClockStyle) -> Self {
        Self { style }
    }

    /// Padding policy this formatter applies.
    pub fn style(&self) -> ClockStyle {
        self.style
    }

    /// Render a millisecond count.
    pub fn format_millis(&self, millis: u64) -> String {
        ClockParts::from_millis(millis).render(self.style)
    }

    /// Render a [`Duration`], dropping sub-millisecond precision.
    pub fn format_duration(&self, duration: Duration) -> String {
        ClockParts::from_duration(duration).render(self.style)
    }

    /// Validate and render a floating-point millisecond value.
    pub fn try_format_f64(&self, millis: f64) -> Result<String, FormatError> {
        try_format_millis_f64(millis, self.style)
    }
}

/// Format a millisecond count as `H:M:S` (with hours) or `M:S`, unpadded.
///
/// Sub-second milliseconds are truncated: `3_599_999` renders as `59:59`.
pub fn format_duration_millis(millis: u64) -> String {
    ClockParts::from_millis(millis).to_string()
}

/// Unpadded clock string for a [`Duration`].
pub fn format_duration(duration: Duration) -> String {
    ClockParts::from_duration(duration).to_string()
}

/// Validate a floating-point millisecond value and format it.
///
/// Fractional milliseconds are truncated. `-0.0` counts as zero.
pub fn try_format_millis_f64(millis: f64, style: ClockStyle) -> Result<String, FormatError> {
    let millis = millis_from_f64(millis)?;
    Ok(ClockParts::from_millis(millis).render(style))
}

/// Format a floating-point millisecond value, clamping anything out of range.
///
/// NaN and negative values render as zero; positive infinity and values past
/// `u64::MAX` saturate.
pub fn format_millis_f64_lossy(millis: f64, style: ClockStyle) -> String {
    let millis = match millis_from_f64(millis) {
        Ok(value) => value,
        Err(FormatError::NotFinite(value)) if value == f64::INFINITY => u64::MAX,
        Err(FormatError::OutOfRange(_)) => u64::MAX,
        Err(_) => 0,
    };
    ClockParts::from_millis(millis).render(style)
}

fn millis_from_f64(millis: f64) -> Result<u64, FormatError> {
    if !millis.is_finite() {
        return Err(FormatError::NotFinite(millis));
    }
    if millis < 0.0 {
        return Err(FormatError::Negative(millis));
    }
    let whole = millis.trunc();
    if whole >= F64_MILLIS_LIMIT {
        return Err(FormatError::OutOfRange(millis));
    }
    Ok(whole as u64)
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
