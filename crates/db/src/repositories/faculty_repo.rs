//! Repository for the `faculty` table.

use sqlx::PgPool;
use ums_core::types::DbId;

use crate::models::faculty::{CreateFaculty, Faculty};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, full_name, department_id, designation, joining_date, created_at, updated_at";

/// Provides create and lookup operations for faculty members.
pub struct FacultyRepo;

impl FacultyRepo {
    pub async fn create(pool: &PgPool, input: &CreateFaculty) -> Result<Faculty, sqlx::Error> {
        let query = format!(
            "INSERT INTO faculty (full_name, department_id, designation, joining_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(&input.full_name)
            .bind(input.department_id)
            .bind(&input.designation)
            .bind(input.joining_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculty WHERE id = $1");
        sqlx::query_as::<_, Faculty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
