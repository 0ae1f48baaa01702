//! Timetable entry models.

use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;
use ums_core::timetable::{IntervalError, ScheduleEntry, TimeRange, Weekday};
use ums_core::types::{DbId, Timestamp};

/// A row from the `timetable_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntry {
    pub id: DbId,
    pub course_id: DbId,
    pub faculty_id: DbId,
    #[sqlx(try_from = "i16")]
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A timetable row joined with its course and faculty names, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntryDetail {
    pub id: DbId,
    pub course_id: DbId,
    pub course_code: String,
    pub course_name: String,
    pub semester: i16,
    pub department_id: DbId,
    pub faculty_id: DbId,
    pub faculty_name: String,
    #[sqlx(try_from = "i16")]
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
}

/// Optional filters for [`TimetableRepo::list`](crate::repositories::TimetableRepo::list).
///
/// `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct TimetableFilter {
    pub department_id: Option<DbId>,
    pub semester: Option<i16>,
    pub course_id: Option<DbId>,
    pub faculty_id: Option<DbId>,
    pub day_of_week: Option<Weekday>,
}

impl TimetableEntry {
    /// Domain view of the stored row, as fed to the conflict checker.
    ///
    /// Fails only if the row violates the table's time-order constraint.
    pub fn to_schedule_entry(&self) -> Result<ScheduleEntry, IntervalError> {
        Ok(ScheduleEntry {
            id: Some(self.id),
            course_id: self.course_id,
            faculty_id: self.faculty_id,
            day_of_week: self.day_of_week,
            time: TimeRange::new(self.start_time, self.end_time)?,
            room: self.room.clone(),
        })
    }
}
