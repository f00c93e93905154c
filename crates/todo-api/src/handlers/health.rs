use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness. Never touches the store.
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Readiness: one round-trip to the store.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "DB Connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "DB Error")
        }
    }
}
