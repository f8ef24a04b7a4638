//! Request validation
//!
//! Provides a `ValidatedJson` extractor that deserializes and then
//! validates request bodies with the validator crate.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::JsonError(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::ValidationFailed(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": "validation_error"
        });

        (status, Json(body)).into_response()
    }
}

/// A JSON extractor that also validates the request body
///
/// Use this instead of `Json<T>` for request types deriving
/// `validator::Validate`; invalid bodies are rejected with a 400
/// before the handler runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe_failures(&e)))?;

        Ok(Self(value))
    }
}

/// Flatten validator output into one deterministic message
///
/// Field errors come out of a map, so they are sorted by field name to
/// keep the message stable across runs.
fn describe_failures(errors: &validator::ValidationErrors) -> String {
    let mut failures: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let reason = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {reason}")
            })
        })
        .collect();
    failures.sort();
    failures.join("; ")
}
