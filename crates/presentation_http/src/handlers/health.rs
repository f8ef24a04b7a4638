//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub classifier: ClassifierStatus,
    pub generation: GenerationStatus,
}

/// Status of the classification backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierStatus {
    pub name: String,
    pub healthy: bool,
}

/// Status of the reply generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub enabled: bool,
    pub healthy: bool,
    pub model: Option<String>,
}

/// Readiness check - is the server ready to accept requests?
///
/// Classification is the one hard dependency. A degraded generation
/// backend still reports ready because triage falls back to template
/// replies.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let report = state.triage_service.readiness().await;

    let ready = report.classifier_healthy;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            classifier: ClassifierStatus {
                name: report.classifier,
                healthy: report.classifier_healthy,
            },
            generation: GenerationStatus {
                enabled: report.generation_enabled,
                healthy: report.inference_healthy,
                model: report.model,
            },
        }),
    )
}
