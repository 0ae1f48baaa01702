//! Handlers for the `/academic` resource.

use axum::extract::State;
use axum::Json;
use ums_core::academic::AcademicConfig;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/academic/config
pub async fn get_config(State(state): State<AppState>) -> Json<DataResponse<AcademicConfig>> {
    Json(DataResponse {
        data: AcademicConfig::clone(&state.academic),
    })
}
