//! API route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers::{health, triage},
    state::AppState,
};

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/v1/triage", post(triage::triage))
        .route("/v1/triage/batch", post(triage::triage_batch))
        .with_state(state)
}
