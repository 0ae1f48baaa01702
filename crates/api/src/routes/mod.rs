pub mod academic;
pub mod faculty;
pub mod health;
pub mod students;
pub mod timetable;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /timetable                           list (view), create (manage)
/// /timetable/check                     availability dry-run (view)
/// /timetable/{id}                      get (view), update, delete (manage)
///
/// /students/{id}/timetable             enrolled-course entries (view)
/// /faculty/{id}/timetable              entries taught (view)
///
/// /academic/config                     academic calendar (view config)
/// ```
///
/// Every group is wrapped in a capability gate, so no route here is public.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/timetable", timetable::router(state))
        .nest("/students", students::router(state))
        .nest("/faculty", faculty::router(state))
        .nest("/academic", academic::router(state))
}
