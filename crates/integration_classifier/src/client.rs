//! Zero-shot classification client
//!
//! HTTP client for a hosted inference endpoint exposing the zero-shot
//! classification task.

use async_trait::async_trait;
use domain::{Urgency, UrgencyScores};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ZeroShotParameters, ZeroShotRequest, ZeroShotResponse};

/// Classifier client errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Connection to the classification service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the classification service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from classification service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Input text is empty after trimming
    #[error("Input text is empty")]
    EmptyInput,

    /// Response carried no score for any known urgency label
    #[error("No usable scores in classification response")]
    EmptyScores,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Classification service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Full model endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token, when the endpoint requires one
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ClassifierConfig {
    /// Set the bearer token
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the model endpoint URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Classifier trait for scoring email text against the urgency labels
#[async_trait]
pub trait UrgencyClassifier: Send + Sync {
    /// Score the given text against the urgency labels
    async fn classify(&self, text: &str) -> Result<UrgencyScores, ClassifierError>;

    /// Check if the classification service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Hosted zero-shot classification client
pub struct ZeroShotClient {
    client: Client,
    config: ClassifierConfig,
}

impl std::fmt::Debug for ZeroShotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroShotClient")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

impl ZeroShotClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifierError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ClassifierError> {
        Self::new(ClassifierConfig::default())
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Map label/score pairs onto the urgency labels
    ///
    /// Unknown labels are skipped, labels missing from the response
    /// score zero. Raw scores are rescaled to sum to 1.0.
    fn scores_from_response(
        response: &ZeroShotResponse,
    ) -> Result<UrgencyScores, ClassifierError> {
        if response.labels.len() != response.scores.len() {
            return Err(ClassifierError::ParseError(format!(
                "{} labels but {} scores",
                response.labels.len(),
                response.scores.len()
            )));
        }

        let mut urgent = 0.0;
        let mut normal = 0.0;
        let mut low = 0.0;
        for (label, score) in response.labels.iter().zip(&response.scores) {
            match label.parse::<Urgency>() {
                Ok(Urgency::Urgent) => urgent = *score,
                Ok(Urgency::Normal) => normal = *score,
                Ok(Urgency::Low) => low = *score,
                Err(_) => {
                    warn!(label = %label, "Skipping unknown label in classification response");
                },
            }
        }

        let scores = UrgencyScores::new(urgent, normal, low)
            .map_err(|e| ClassifierError::ParseError(e.to_string()))?;

        if scores.is_empty() {
            return Err(ClassifierError::EmptyScores);
        }

        Ok(scores.normalized())
    }
}

#[async_trait]
impl UrgencyClassifier for ZeroShotClient {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn classify(&self, text: &str) -> Result<UrgencyScores, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let payload = ZeroShotRequest {
            inputs: text.to_string(),
            parameters: ZeroShotParameters {
                candidate_labels: Urgency::all()
                    .iter()
                    .map(|u| u.label().to_string())
                    .collect(),
            },
        };

        debug!(endpoint = %self.config.endpoint, "Sending classification request");

        let response = self
            .authorize(self.client.post(&self.config.endpoint))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClassifierError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(ClassifierError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(ClassifierError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::ParseError(e.to_string()))?;

        Self::scores_from_response(&api_response)
    }

    async fn is_healthy(&self) -> bool {
        let response = self
            .authorize(self.client.get(&self.config.endpoint))
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(
            config.endpoint,
            "https://api-inference.huggingface.co/models/facebook/bart-large-mnli"
        );
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn with_api_token_sets_token() {
        let config = ClassifierConfig::default().with_api_token("hf-test");
        assert!(config.api_token.is_some());
    }

    #[test]
    fn config_deserialization_with_defaults() {
        let config: ClassifierConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn config_deserialization_with_overrides() {
        let json = r#"{"endpoint":"http://localhost:9000/classify","timeout_secs":5}"#;
        let config: ClassifierConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/classify");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        assert!(ZeroShotClient::with_defaults().is_ok());
    }

    #[test]
    fn debug_does_not_leak_api_token() {
        let client =
            ZeroShotClient::new(ClassifierConfig::default().with_api_token("hf-very-secret"))
                .unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("hf-very-secret"));
    }

    #[test]
    fn scores_map_onto_labels() {
        let response = ZeroShotResponse {
            labels: vec!["Urgent".to_string(), "Normal".to_string(), "Low".to_string()],
            scores: vec![0.8, 0.15, 0.05],
        };

        let scores = ZeroShotClient::scores_from_response(&response).unwrap();
        assert!((scores.urgent() - 0.8).abs() < 1e-9);
        assert!((scores.normal() - 0.15).abs() < 1e-9);
        assert!((scores.low() - 0.05).abs() < 1e-9);
        assert_eq!(scores.top(), Urgency::Urgent);
    }

    #[test]
    fn labels_match_case_insensitively() {
        let response = ZeroShotResponse {
            labels: vec!["urgent".to_string(), "NORMAL".to_string(), "low".to_string()],
            scores: vec![0.1, 0.2, 0.7],
        };

        let scores = ZeroShotClient::scores_from_response(&response).unwrap();
        assert_eq!(scores.top(), Urgency::Low);
    }

    #[test]
    fn unknown_labels_are_skipped() {
        let response = ZeroShotResponse {
            labels: vec!["Urgent".to_string(), "Critical".to_string()],
            scores: vec![0.6, 0.4],
        };

        let scores = ZeroShotClient::scores_from_response(&response).unwrap();
        assert!((scores.urgent() - 1.0).abs() < 1e-9);
        assert!((scores.normal()).abs() < 1e-9);
    }

    #[test]
    fn unnormalized_scores_are_rescaled() {
        let response = ZeroShotResponse {
            labels: vec!["Urgent".to_string(), "Normal".to_string(), "Low".to_string()],
            scores: vec![0.5, 0.25, 0.25],
        };

        let scores = ZeroShotClient::scores_from_response(&response).unwrap();
        let sum = scores.urgent() + scores.normal() + scores.low();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_arrays_are_rejected() {
        let response = ZeroShotResponse {
            labels: vec!["Urgent".to_string(), "Normal".to_string()],
            scores: vec![0.9],
        };

        let err = ZeroShotClient::scores_from_response(&response).unwrap_err();
        assert!(matches!(err, ClassifierError::ParseError(_)));
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let response = ZeroShotResponse {
            labels: vec!["Urgent".to_string()],
            scores: vec![1.5],
        };

        let err = ZeroShotClient::scores_from_response(&response).unwrap_err();
        assert!(matches!(err, ClassifierError::ParseError(_)));
    }

    #[test]
    fn all_unknown_labels_yield_empty_scores() {
        let response = ZeroShotResponse {
            labels: vec!["POSITIVE".to_string(), "NEGATIVE".to_string()],
            scores: vec![0.7, 0.3],
        };

        let err = ZeroShotClient::scores_from_response(&response).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyScores));
    }

    #[test]
    fn error_display() {
        let err = ClassifierError::RateLimitExceeded;
        assert!(err.to_string().contains("Rate limit"));

        let err = ClassifierError::EmptyInput;
        assert!(err.to_string().contains("empty"));
    }
}
