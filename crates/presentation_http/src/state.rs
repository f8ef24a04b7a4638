//! Application state shared across handlers

use std::sync::Arc;

use application::TriageService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Triage pipeline service
    pub triage_service: Arc<TriageService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
