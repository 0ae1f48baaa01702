use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use ums_core::error::CoreError;
use ums_core::timetable::ScheduleError;
use ums_db::repositories::TimetableWriteError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`ScheduleError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses of the form `{ "error", "code" }`, plus `fields`
/// (and `conflicts` for double-booking) on timetable validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ums_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected timetable write.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<TimetableWriteError> for AppError {
    fn from(err: TimetableWriteError) -> Self {
        match err {
            TimetableWriteError::Schedule(e) => AppError::Schedule(e),
            TimetableWriteError::UnknownReference { .. } => AppError::BadRequest(err.to_string()),
            TimetableWriteError::Database(e) => AppError::Database(e),
        }
    }
}

// Extraction failures (see `crate::extract`) become 400s with the
// standard body rather than axum's plain-text rejection.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Timetable validation (carries field detail) ---
            AppError::Schedule(err) => return schedule_error_response(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Field-level timetable failures.
///
/// - Bad field formats and a malformed interval map to 400 `VALIDATION_ERROR`.
/// - Double-booking maps to 409 `SCHEDULE_CONFLICT` with the full report.
fn schedule_error_response(err: &ScheduleError) -> Response {
    let fields = err.field_errors();

    let (status, body) = match err {
        ScheduleError::Conflicts(report) => {
            tracing::info!(conflicts = %report.summary(), "Timetable entry rejected");
            (
                StatusCode::CONFLICT,
                json!({
                    "error": err.to_string(),
                    "code": "SCHEDULE_CONFLICT",
                    "fields": fields,
                    "conflicts": report,
                }),
            )
        }
        ScheduleError::InvalidInput(_) | ScheduleError::MalformedInterval(_) => (
            StatusCode::BAD_REQUEST,
            json!({
                "error": err.to_string(),
                "code": "VALIDATION_ERROR",
                "fields": fields,
            }),
        ),
    };

    (status, axum::Json::<Value>(body)).into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return (
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                // PostgreSQL foreign key violation
                Some("23503") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "BAD_REQUEST",
                        "Referenced record does not exist".to_string(),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
