//! Route definitions for the `/timetable` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use ums_core::permissions::Capability;

use crate::handlers::timetable;
use crate::middleware::capability::{enforce_capability, CapabilityGate};
use crate::state::AppState;

/// Routes mounted at `/timetable`.
///
/// ```text
/// GET    /          -> list_entries    (ViewTimetable)
/// POST   /check     -> check_entry     (ViewTimetable)
/// GET    /{id}      -> get_entry       (ViewTimetable)
/// POST   /          -> create_entry    (ManageTimetable)
/// PUT    /{id}      -> update_entry    (ManageTimetable)
/// DELETE /{id}      -> delete_entry    (ManageTimetable)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(timetable::list_entries))
        .route("/check", post(timetable::check_entry))
        .route("/{id}", get(timetable::get_entry))
        .route_layer(from_fn_with_state(
            CapabilityGate::new(state, Capability::ViewTimetable),
            enforce_capability,
        ));

    let write = Router::new()
        .route("/", post(timetable::create_entry))
        .route(
            "/{id}",
            put(timetable::update_entry).delete(timetable::delete_entry),
        )
        .route_layer(from_fn_with_state(
            CapabilityGate::new(state, Capability::ManageTimetable),
            enforce_capability,
        ));

    read.merge(write)
}
