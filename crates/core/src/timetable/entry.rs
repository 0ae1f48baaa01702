//! Schedule entries and the create/update validation pipeline.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::conflict::{check_conflicts, ConflictReport};
use super::time_range::{IntervalError, TimeRange};
use super::weekday::Weekday;
use crate::types::DbId;

/// Maximum room identifier length (matches the `room` column width).
pub const MAX_ROOM_LEN: usize = 20;

/// One weekly recurring class session.
///
/// `id` is `None` for a candidate that has never been stored. When it is
/// set, the conflict check skips the stored row with the same id so an
/// edit never collides with its own previous version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub id: Option<DbId>,
    pub course_id: DbId,
    pub faculty_id: DbId,
    pub day_of_week: Weekday,
    #[serde(flatten)]
    pub time: TimeRange,
    pub room: String,
}

/// Raw field values submitted by a create or update request.
///
/// Field-level format checks run through [`Validate`]; the interval and
/// conflict checks run in [`ProposedEntry::to_entry`] and [`validate_entry`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProposedEntry {
    #[validate(range(min = 1, message = "Unknown course"))]
    pub course_id: DbId,
    #[validate(range(min = 1, message = "Unknown faculty member"))]
    pub faculty_id: DbId,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(custom(function = "validate_room"))]
    pub room: String,
}

/// Reasons a proposed entry cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid timetable entry: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error(transparent)]
    MalformedInterval(#[from] IntervalError),

    #[error("Schedule conflict: {}", .0.summary())]
    Conflicts(Box<ConflictReport>),
}

fn validate_room(room: &str) -> Result<(), ValidationError> {
    let trimmed = room.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_ROOM_LEN {
        let mut err = ValidationError::new("room_length");
        err.message = Some(format!("Room must be 1 to {MAX_ROOM_LEN} characters").into());
        return Err(err);
    }
    Ok(())
}

impl ProposedEntry {
    /// Check field formats and the time ordering, producing a well-formed
    /// entry ready for conflict evaluation.
    pub fn to_entry(&self, id: Option<DbId>) -> Result<ScheduleEntry, ScheduleError> {
        self.validate()?;
        let time = TimeRange::new(self.start_time, self.end_time)?;

        Ok(ScheduleEntry {
            id,
            course_id: self.course_id,
            faculty_id: self.faculty_id,
            day_of_week: self.day_of_week,
            time,
            room: self.room.trim().to_string(),
        })
    }
}

/// Run the full pipeline: field checks, time ordering, then the three
/// double-booking checks against `existing`.
///
/// Returns the validated entry when it is free of conflicts. Every failed
/// check is carried in [`ScheduleError::Conflicts`], not just the first.
pub fn validate_entry<'a, I>(
    proposal: &ProposedEntry,
    id: Option<DbId>,
    existing: I,
) -> Result<ScheduleEntry, ScheduleError>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let candidate = proposal.to_entry(id)?;
    let report = check_conflicts(&candidate, existing);
    if !report.is_clear() {
        return Err(ScheduleError::Conflicts(Box::new(report)));
    }
    Ok(candidate)
}

impl ScheduleError {
    /// Field-level messages keyed by the request field they belong to.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            ScheduleError::InvalidInput(errors) => errors
                .field_errors()
                .into_iter()
                .map(|(field, errs)| {
                    let messages = errs
                        .iter()
                        .map(|e| match &e.message {
                            Some(msg) => msg.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    (field.to_string(), messages)
                })
                .collect(),
            ScheduleError::MalformedInterval(err) => {
                BTreeMap::from([("end_time".to_string(), vec![err.to_string()])])
            }
            ScheduleError::Conflicts(report) => report.field_errors(),
        }
    }
}
