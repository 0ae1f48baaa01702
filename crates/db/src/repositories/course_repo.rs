//! Repository for the `courses` table.

use sqlx::PgPool;
use ums_core::types::DbId;

use crate::models::course::{CreateCourse, Course};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, department_id, faculty_id, semester, credits, \
                       capacity, created_at, updated_at";

/// Matches the column default in the `courses` migration.
const DEFAULT_CAPACITY: i32 = 60;

pub struct CourseRepo;

impl CourseRepo {
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, code, department_id, faculty_id, semester, credits, capacity)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.department_id)
            .bind(input.faculty_id)
            .bind(input.semester)
            .bind(input.credits)
            .bind(input.capacity.unwrap_or(DEFAULT_CAPACITY))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
