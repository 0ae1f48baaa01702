use crate::types::DbId;

/// Cross-cutting domain errors shared by the repository and HTTP layers.
///
/// Timetable write failures have their own richer type,
/// [`ScheduleError`](crate::timetable::ScheduleError), because they carry
/// field-level detail.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}
