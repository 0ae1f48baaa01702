//! Repository for the `timetable_entries` table.
//!
//! Writes go through [`TimetableRepo::create`] and [`TimetableRepo::update`],
//! which run the double-booking check inside the same transaction as the
//! write, under an advisory lock scoped to the entry's weekday.

use sqlx::{PgConnection, PgExecutor, PgPool};
use ums_core::timetable::{
    check_conflicts, validate_entry, ConflictReport, ProposedEntry, ScheduleEntry, ScheduleError,
    Weekday,
};
use ums_core::types::DbId;

use crate::models::timetable::{TimetableEntry, TimetableEntryDetail, TimetableFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, faculty_id, day_of_week, start_time, end_time, room, \
                       created_at, updated_at";

/// Columns for joined listings (see [`TimetableEntryDetail`]).
const DETAIL_COLUMNS: &str = "t.id, t.course_id, c.code AS course_code, c.name AS course_name, \
                              c.semester, c.department_id, t.faculty_id, \
                              f.full_name AS faculty_name, t.day_of_week, t.start_time, \
                              t.end_time, t.room";

const DETAIL_FROM: &str = "timetable_entries t \
                           JOIN courses c ON c.id = t.course_id \
                           JOIN faculty f ON f.id = t.faculty_id";

/// Base key for the per-weekday advisory lock. The ISO weekday number is
/// added, so writers on different days never contend.
pub const TIMETABLE_LOCK_BASE: i64 = 724_031_500;

/// Why a timetable create or update did not happen.
#[derive(Debug, thiserror::Error)]
pub enum TimetableWriteError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Unknown {entity} with id {id}")]
    UnknownReference { entity: &'static str, id: DbId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides validated writes and filtered listings for timetable entries.
pub struct TimetableRepo;

impl TimetableRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timetable_entries WHERE id = $1");
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stored entries for one weekday, ordered by start time.
    ///
    /// This is the snapshot the conflict check runs against.
    pub async fn list_for_day<'e, E>(
        executor: E,
        day: Weekday,
    ) -> Result<Vec<TimetableEntry>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM timetable_entries
             WHERE day_of_week = $1
             ORDER BY start_time, id"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(day.number())
            .fetch_all(executor)
            .await
    }

    /// List entries with course and faculty names, ordered by weekday then
    /// start time. Unset filter fields match everything.
    pub async fn list(
        pool: &PgPool,
        filter: &TimetableFilter,
    ) -> Result<Vec<TimetableEntryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE ($1::BIGINT IS NULL OR c.department_id = $1)
               AND ($2::SMALLINT IS NULL OR c.semester = $2)
               AND ($3::BIGINT IS NULL OR t.course_id = $3)
               AND ($4::BIGINT IS NULL OR t.faculty_id = $4)
               AND ($5::SMALLINT IS NULL OR t.day_of_week = $5)
             ORDER BY t.day_of_week, t.start_time, t.id"
        );
        sqlx::query_as::<_, TimetableEntryDetail>(&query)
            .bind(filter.department_id)
            .bind(filter.semester)
            .bind(filter.course_id)
            .bind(filter.faculty_id)
            .bind(filter.day_of_week.map(Weekday::number))
            .fetch_all(pool)
            .await
    }

    /// Entries for every course the student is enrolled in.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<TimetableEntryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE t.course_id IN (
                 SELECT course_id FROM course_enrollments WHERE student_id = $1
             )
             ORDER BY t.day_of_week, t.start_time, t.id"
        );
        sqlx::query_as::<_, TimetableEntryDetail>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Availability dry-run: evaluate `proposal` against the stored schedule
    /// and return the full report without writing anything.
    ///
    /// `exclude_id` names the stored entry being edited, if any.
    pub async fn check(
        pool: &PgPool,
        proposal: &ProposedEntry,
        exclude_id: Option<DbId>,
    ) -> Result<ConflictReport, TimetableWriteError> {
        let candidate = proposal.to_entry(exclude_id)?;
        let rows = Self::list_for_day(pool, candidate.day_of_week).await?;
        let existing = to_schedule_entries(&rows)?;
        Ok(check_conflicts(&candidate, &existing))
    }

    /// Validate and insert a new entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        proposal: &ProposedEntry,
    ) -> Result<TimetableEntry, TimetableWriteError> {
        let mut tx = pool.begin().await?;

        let entry = validate_locked(&mut tx, proposal, None).await?;

        let query = format!(
            "INSERT INTO timetable_entries (course_id, faculty_id, day_of_week, start_time, end_time, room)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(entry.course_id)
            .bind(entry.faculty_id)
            .bind(entry.day_of_week.number())
            .bind(entry.time.start())
            .bind(entry.time.end())
            .bind(&entry.room)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Validate and replace every field of an existing entry.
    ///
    /// The entry's own stored version is excluded from the conflict check.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        proposal: &ProposedEntry,
    ) -> Result<Option<TimetableEntry>, TimetableWriteError> {
        let mut tx = pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM timetable_entries WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Ok(None);
        }

        let entry = validate_locked(&mut tx, proposal, Some(id)).await?;

        let query = format!(
            "UPDATE timetable_entries SET
                course_id = $2,
                faculty_id = $3,
                day_of_week = $4,
                start_time = $5,
                end_time = $6,
                room = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .bind(entry.course_id)
            .bind(entry.faculty_id)
            .bind(entry.day_of_week.number())
            .bind(entry.time.start())
            .bind(entry.time.end())
            .bind(&entry.room)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timetable_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Take the weekday lock, then run field, interval, conflict and reference
/// checks against the day's rows as seen inside the transaction.
async fn validate_locked(
    conn: &mut PgConnection,
    proposal: &ProposedEntry,
    id: Option<DbId>,
) -> Result<ScheduleEntry, TimetableWriteError> {
    lock_day(conn, proposal.day_of_week).await?;

    let rows = TimetableRepo::list_for_day(&mut *conn, proposal.day_of_week).await?;
    let existing = to_schedule_entries(&rows)?;

    let entry = validate_entry(proposal, id, &existing).inspect_err(|err| {
        if let ScheduleError::Conflicts(report) = err {
            tracing::debug!(
                day = %proposal.day_of_week,
                conflicts = %report.summary(),
                "Timetable write rejected",
            );
        }
    })?;

    ensure_exists(conn, "courses", "course", entry.course_id).await?;
    ensure_exists(conn, "faculty", "faculty", entry.faculty_id).await?;

    Ok(entry)
}

/// Serialize writers for one weekday until the transaction ends.
async fn lock_day(conn: &mut PgConnection, day: Weekday) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(TIMETABLE_LOCK_BASE + i64::from(day.number()))
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn ensure_exists(
    conn: &mut PgConnection,
    table: &'static str,
    entity: &'static str,
    id: DbId,
) -> Result<(), TimetableWriteError> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
    let found: bool = sqlx::query_scalar(&query)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    if !found {
        return Err(TimetableWriteError::UnknownReference { entity, id });
    }
    Ok(())
}

fn to_schedule_entries(rows: &[TimetableEntry]) -> Result<Vec<ScheduleEntry>, sqlx::Error> {
    rows.iter()
        .map(|row| {
            row.to_schedule_entry()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))
        })
        .collect()
}
