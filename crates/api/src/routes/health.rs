use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness payload. Public, so it carries nothing beyond what a load
/// balancer or operator needs.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Academic year the timetable is being served for.
    pub academic_year: String,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = ums_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        academic_year: state.academic.academic_year.clone(),
    })
}

/// Root-level routes, mounted outside `/api/v1` and outside any capability gate.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
