//! Double-booking detection for weekly schedule entries.
//!
//! Two entries conflict when they fall on the same day, their time ranges
//! overlap, and they share a faculty member, a room, or a course. The three
//! resources are checked independently and every failing check is reported.

use std::collections::BTreeMap;

use serde::Serialize;

use super::entry::ScheduleEntry;

/// The constrained resource an overlapping entry collides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Faculty,
    Room,
    Course,
}

impl ConflictKind {
    pub const ALL: [ConflictKind; 3] = [
        ConflictKind::Faculty,
        ConflictKind::Room,
        ConflictKind::Course,
    ];

    /// Request field the conflict is reported against.
    pub fn field(self) -> &'static str {
        match self {
            ConflictKind::Faculty => "faculty",
            ConflictKind::Room => "room",
            ConflictKind::Course => "course",
        }
    }
}

/// Result of one resource check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub passed: bool,
    /// Existing entries that caused the failure. Empty when `passed`.
    pub conflicting: Vec<ScheduleEntry>,
}

impl CheckOutcome {
    fn from_conflicts(conflicting: Vec<ScheduleEntry>) -> Self {
        Self {
            passed: conflicting.is_empty(),
            conflicting,
        }
    }
}

/// Per-resource outcome of checking one candidate against a day's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub faculty: CheckOutcome,
    pub room: CheckOutcome,
    pub course: CheckOutcome,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.faculty.passed && self.room.passed && self.course.passed
    }

    pub fn outcome(&self, kind: ConflictKind) -> &CheckOutcome {
        match kind {
            ConflictKind::Faculty => &self.faculty,
            ConflictKind::Room => &self.room,
            ConflictKind::Course => &self.course,
        }
    }

    pub fn failed_kinds(&self) -> Vec<ConflictKind> {
        ConflictKind::ALL
            .into_iter()
            .filter(|kind| !self.outcome(*kind).passed)
            .collect()
    }

    /// Short description such as `"faculty, room"`, or `"none"`.
    pub fn summary(&self) -> String {
        let kinds = self.failed_kinds();
        if kinds.is_empty() {
            return "none".to_string();
        }
        kinds
            .iter()
            .map(|k| k.field())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One message per conflicting entry, keyed by `faculty`, `room`, `course`.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        ConflictKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let outcome = self.outcome(kind);
                if outcome.passed {
                    return None;
                }
                let messages = outcome
                    .conflicting
                    .iter()
                    .map(|existing| conflict_message(kind, existing))
                    .collect();
                Some((kind.field().to_string(), messages))
            })
            .collect()
    }
}

fn conflict_message(kind: ConflictKind, existing: &ScheduleEntry) -> String {
    let when = format!("{} {}", existing.day_of_week, existing.time);
    match kind {
        ConflictKind::Faculty => format!(
            "Faculty {} is already busy at this time (course {} in room {}, {when}).",
            existing.faculty_id, existing.course_id, existing.room
        ),
        ConflictKind::Room => format!(
            "Room {} is already booked at this time (course {}, {when}).",
            existing.room, existing.course_id
        ),
        ConflictKind::Course => format!(
            "Course {} already has a class at this time (room {}, {when}).",
            existing.course_id, existing.room
        ),
    }
}

/// Check `candidate` against `existing` on all three resources.
///
/// The stored entry sharing the candidate's id is skipped, so revalidating
/// an edit never reports the entry against itself. Entries on other days
/// never conflict. Callers typically pass only the candidate's day, but the
/// day is re-checked here so a wider snapshot is also safe.
pub fn check_conflicts<'a, I>(candidate: &ScheduleEntry, existing: I) -> ConflictReport
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let mut faculty = Vec::new();
    let mut room = Vec::new();
    let mut course = Vec::new();

    let overlapping = existing.into_iter().filter(|e| {
        (candidate.id.is_none() || e.id != candidate.id)
            && e.day_of_week == candidate.day_of_week
            && e.time.overlaps(&candidate.time)
    });

    for e in overlapping {
        if e.faculty_id == candidate.faculty_id {
            faculty.push(e.clone());
        }
        if e.room == candidate.room {
            room.push(e.clone());
        }
        if e.course_id == candidate.course_id {
            course.push(e.clone());
        }
    }

    ConflictReport {
        faculty: CheckOutcome::from_conflicts(faculty),
        room: CheckOutcome::from_conflicts(room),
        course: CheckOutcome::from_conflicts(course),
    }
}
