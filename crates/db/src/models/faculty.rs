//! Faculty member model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ums_core::types::{DbId, Timestamp};

/// A row from the `faculty` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faculty {
    pub id: DbId,
    pub full_name: String,
    pub department_id: Option<DbId>,
    pub designation: String,
    pub joining_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateFaculty {
    pub full_name: String,
    pub department_id: Option<DbId>,
    pub designation: String,
    pub joining_date: NaiveDate,
}
