//! Route-level capability enforcement.
//!
//! Each router group is wrapped with [`enforce_capability`], configured by a
//! [`CapabilityGate`] naming the one capability the whole group needs. The
//! role-to-capability table lives in [`Role::permits`](ums_core::permissions::Role::permits).

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use ums_core::error::CoreError;
use ums_core::permissions::Capability;

use super::auth::AuthUser;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;

/// State for [`enforce_capability`].
#[derive(Clone)]
pub struct CapabilityGate {
    pub capability: Capability,
    pub config: Arc<ServerConfig>,
}

impl CapabilityGate {
    pub fn new(state: &AppState, capability: Capability) -> Self {
        Self {
            capability,
            config: Arc::clone(&state.config),
        }
    }
}

/// Reject callers without a valid token (401) or without the gate's
/// capability (403). Admitted callers are stored as an [`AuthUser`]
/// extension for handlers.
pub async fn enforce_capability(
    State(gate): State<CapabilityGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = AuthUser::from_headers(request.headers(), &gate.config.jwt)?;

    if !user.role.permits(gate.capability) {
        tracing::debug!(
            user_id = user.user_id,
            role = %user.role,
            capability = %gate.capability,
            "Capability denied",
        );
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Role '{}' lacks capability '{}'",
            user.role, gate.capability
        ))));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
