//! Handlers for the `/timetable` resource and the per-person timetable views.
//!
//! Writes go through [`TimetableRepo`], which runs the double-booking check
//! in the same transaction as the insert or update. A rejected write surfaces
//! as `409 SCHEDULE_CONFLICT` with per-field messages.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use ums_core::error::CoreError;
use ums_core::timetable::{ConflictReport, ProposedEntry, Weekday};
use ums_core::types::DbId;
use ums_db::models::timetable::{TimetableEntry, TimetableEntryDetail, TimetableFilter};
use ums_db::repositories::{FacultyRepo, StudentRepo, TimetableRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /timetable`.
#[derive(Debug, Default, Deserialize)]
pub struct TimetableListParams {
    pub department: Option<DbId>,
    /// A semester number, or `current` for the configured current semester.
    pub semester: Option<String>,
    pub course: Option<DbId>,
    pub faculty: Option<DbId>,
    pub day: Option<Weekday>,
}

/// Request body for `POST /timetable/check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(flatten)]
    pub entry: ProposedEntry,
    /// Stored entry being edited, excluded from the check.
    pub exclude_id: Option<DbId>,
}

/// Result of an availability dry-run.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub available: bool,
    pub conflicts: ConflictReport,
    pub fields: BTreeMap<String, Vec<String>>,
}

/// GET /api/v1/timetable
pub async fn list_entries(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TimetableListParams>,
) -> AppResult<Json<DataResponse<Vec<TimetableEntryDetail>>>> {
    let semester = match params.semester.as_deref() {
        None => None,
        Some(raw) => Some(state.academic.resolve_semester(raw).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid semester '{raw}': expected 1-8 or 'current'"
            ))
        })?),
    };

    let filter = TimetableFilter {
        department_id: params.department,
        semester,
        course_id: params.course,
        faculty_id: params.faculty,
        day_of_week: params.day,
    };

    let entries = TimetableRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/timetable/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<TimetableEntry>>> {
    let entry = TimetableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("TimetableEntry", id)))?;
    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/timetable
pub async fn create_entry(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<ProposedEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<TimetableEntry>>)> {
    let entry = TimetableRepo::create(&state.pool, &input).await?;

    tracing::info!(
        entry_id = entry.id,
        user_id = user.user_id,
        day = %entry.day_of_week,
        room = %entry.room,
        "Timetable entry created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/timetable/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProposedEntry>,
) -> AppResult<Json<DataResponse<TimetableEntry>>> {
    let entry = TimetableRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("TimetableEntry", id)))?;

    tracing::info!(entry_id = id, user_id = user.user_id, "Timetable entry updated");

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/timetable/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !TimetableRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("TimetableEntry", id)));
    }

    tracing::info!(entry_id = id, user_id = user.user_id, "Timetable entry deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/timetable/check
///
/// Evaluates the proposal against the stored schedule without writing.
/// Double-booking is reported in the body, not as an error status.
pub async fn check_entry(
    State(state): State<AppState>,
    AppJson(input): AppJson<CheckRequest>,
) -> AppResult<Json<DataResponse<CheckResponse>>> {
    let report = TimetableRepo::check(&state.pool, &input.entry, input.exclude_id).await?;

    Ok(Json(DataResponse {
        data: CheckResponse {
            available: report.is_clear(),
            fields: report.field_errors(),
            conflicts: report,
        },
    }))
}

/// GET /api/v1/students/{id}/timetable
pub async fn student_timetable(
    State(state): State<AppState>,
    AppPath(student_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimetableEntryDetail>>>> {
    StudentRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Student", student_id)))?;

    let entries = TimetableRepo::list_for_student(&state.pool, student_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/faculty/{id}/timetable
pub async fn faculty_timetable(
    State(state): State<AppState>,
    AppPath(faculty_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimetableEntryDetail>>>> {
    FacultyRepo::find_by_id(&state.pool, faculty_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Faculty", faculty_id)))?;

    let filter = TimetableFilter {
        faculty_id: Some(faculty_id),
        ..TimetableFilter::default()
    };
    let entries = TimetableRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: entries }))
}
