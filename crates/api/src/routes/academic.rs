use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use ums_core::permissions::Capability;

use crate::handlers::academic;
use crate::middleware::capability::{enforce_capability, CapabilityGate};
use crate::state::AppState;

/// Routes mounted at `/academic`.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/config", get(academic::get_config))
        .route_layer(from_fn_with_state(
            CapabilityGate::new(state, Capability::ViewAcademicConfig),
            enforce_capability,
        ))
}
