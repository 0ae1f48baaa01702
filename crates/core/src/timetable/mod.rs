//! Weekly timetable domain: weekdays, time ranges, schedule entries and the
//! double-booking validator.
//!
//! Everything here is pure. The repository layer supplies the existing
//! entries for a day and decides what to do with the resulting report.

pub mod conflict;
pub mod entry;
pub mod time_range;
pub mod weekday;

pub use conflict::{check_conflicts, CheckOutcome, ConflictKind, ConflictReport};
pub use entry::{validate_entry, ProposedEntry, ScheduleEntry, ScheduleError};
pub use time_range::{IntervalError, TimeRange};
pub use weekday::{Weekday, WeekdayParseError};
