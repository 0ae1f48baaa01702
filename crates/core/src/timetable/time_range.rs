//! Time-of-day interval for a single class session.

use chrono::NaiveTime;
use serde::Serialize;

/// A half-open `[start, end)` time-of-day interval with `start < end`.
///
/// The only constructor is [`TimeRange::new`], so a value of this type is
/// always well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    #[serde(rename = "start_time")]
    start: NaiveTime,
    #[serde(rename = "end_time")]
    end: NaiveTime,
}

/// Rejected interval where the end does not come strictly after the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("End time must be after start time (got {} - {})", .start.format("%H:%M"), .end.format("%H:%M"))]
pub struct IntervalError {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, IntervalError> {
        if end <= start {
            return Err(IntervalError { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Half-open overlap: touching ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
