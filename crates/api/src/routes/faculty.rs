//! Route definitions for the `/faculty` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use ums_core::permissions::Capability;

use crate::handlers::timetable;
use crate::middleware::capability::{enforce_capability, CapabilityGate};
use crate::state::AppState;

/// Routes mounted at `/faculty`.
///
/// ```text
/// GET    /{id}/timetable    -> faculty_timetable
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}/timetable", get(timetable::faculty_timetable))
        .route_layer(from_fn_with_state(
            CapabilityGate::new(state, Capability::ViewTimetable),
            enforce_capability,
        ))
}
