//! Repository for the `departments` table.

use sqlx::PgPool;

use crate::models::department::{CreateDepartment, Department};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, created_at, updated_at";

pub struct DepartmentRepo;

impl DepartmentRepo {
    pub async fn create(pool: &PgPool, input: &CreateDepartment) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (name, code)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }
}
