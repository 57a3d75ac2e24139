//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Probes the backend API's `/health`. Returns 503 Service Unavailable if
/// the backend is unreachable or unhealthy.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.backend().health().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Backend not ready: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
