use std::sync::Arc;

use ums_core::academic::AcademicConfig;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ums_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Academic calendar, loaded once at startup.
    pub academic: Arc<AcademicConfig>,
}
