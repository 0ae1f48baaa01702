//! Student model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ums_core::types::{DbId, Timestamp};

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub full_name: String,
    pub enrollment_no: String,
    pub department_id: Option<DbId>,
    pub semester: i16,
    pub admission_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudent {
    pub full_name: String,
    pub enrollment_no: String,
    pub department_id: Option<DbId>,
    pub semester: i16,
    pub admission_date: NaiveDate,
}
