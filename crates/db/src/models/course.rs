//! Course model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ums_core::types::{DbId, Timestamp};

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub department_id: DbId,
    /// Default instructor; timetable entries may assign someone else.
    pub faculty_id: Option<DbId>,
    pub semester: i16,
    pub credits: i32,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub code: String,
    pub department_id: DbId,
    pub faculty_id: Option<DbId>,
    pub semester: i16,
    pub credits: i32,
    /// Defaults to 60 when omitted.
    pub capacity: Option<i32>,
}
