//! Triage handlers

use axum::{Json, extract::State};
use domain::{EmailMessage, Sender, Tone, TriageResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    error::{ApiError, sanitize_error_message},
    middleware::ValidatedJson,
    state::AppState,
};

/// Triage request body
#[derive(Debug, Deserialize, Validate)]
pub struct TriageRequest {
    /// Sender as a bare address or `Name <address>`
    #[serde(default)]
    #[validate(length(max = 320, message = "must be at most 320 characters"))]
    pub sender: Option<String>,
    /// Subject line
    #[serde(default)]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub subject: String,
    /// Plain-text body
    #[serde(default)]
    #[validate(length(max = 50000, message = "must be at most 50000 characters"))]
    pub body: String,
    /// Reply tone, defaults to the server's configured tone
    #[serde(default)]
    pub tone: Option<Tone>,
}

/// Triage response body
#[derive(Debug, Serialize)]
pub struct TriageResponse {
    /// Winning urgency label
    pub urgency: String,
    /// Badge for the winning label
    pub badge: String,
    /// Per-label confidence scores
    pub scores: ScoreBreakdown,
    /// One-line summary of what the sender wants
    pub intent: String,
    /// Drafted reply
    pub reply: ReplyBody,
}

/// Per-label scores in the response
#[derive(Debug, Serialize)]
pub struct ScoreBreakdown {
    pub urgent: f64,
    pub normal: f64,
    pub low: f64,
}

/// Reply draft in the response
#[derive(Debug, Serialize)]
pub struct ReplyBody {
    pub subject: String,
    pub body: String,
    pub source: String,
}

impl From<TriageResult> for TriageResponse {
    fn from(result: TriageResult) -> Self {
        Self {
            urgency: result.urgency.label().to_string(),
            badge: result.urgency.badge().to_string(),
            scores: ScoreBreakdown {
                urgent: result.scores.urgent(),
                normal: result.scores.normal(),
                low: result.scores.low(),
            },
            intent: result.intent,
            reply: ReplyBody {
                subject: result.reply.subject,
                body: result.reply.body,
                source: result.reply.source.to_string(),
            },
        }
    }
}

/// Handle a single triage request
#[instrument(skip(state, request), fields(subject_len = request.subject.len(), body_len = request.body.len()))]
pub async fn triage(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TriageRequest>,
) -> Result<Json<TriageResponse>, ApiError> {
    let email = build_email(request.sender.as_deref(), &request.subject, &request.body)
        .map_err(ApiError::BadRequest)?;
    let tone = request.tone.unwrap_or(state.config.reply.default_tone);

    let result = state.triage_service.triage(&email, tone).await?;

    Ok(Json(result.into()))
}

/// One message inside a batch request
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BatchMessage {
    #[serde(default)]
    #[validate(length(max = 320, message = "must be at most 320 characters"))]
    pub sender: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 50000, message = "must be at most 50000 characters"))]
    pub body: String,
}

/// Batch triage request body
#[derive(Debug, Deserialize, Validate)]
pub struct BatchTriageRequest {
    /// Messages to triage, in order
    #[validate(
        length(min = 1, max = 100, message = "must contain between 1 and 100 messages"),
        nested
    )]
    pub messages: Vec<BatchMessage>,
    /// Reply tone applied to every drafted reply
    #[serde(default)]
    pub tone: Option<Tone>,
}

/// Batch triage response body
#[derive(Debug, Serialize)]
pub struct BatchTriageResponse {
    /// One entry per submitted message, in submission order
    pub results: Vec<BatchEntry>,
}

/// Outcome of one batch row
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Success { ok: TriageResponse },
    Failure { error: String },
}

/// Handle a batch triage request
///
/// Rows fail independently. A malformed or unclassifiable message
/// yields an error entry in its slot while the rest of the batch
/// completes.
#[instrument(skip(state, request), fields(count = request.messages.len()))]
pub async fn triage_batch(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BatchTriageRequest>,
) -> Result<Json<BatchTriageResponse>, ApiError> {
    let tone = request.tone.unwrap_or(state.config.reply.default_tone);

    let parsed: Vec<Result<EmailMessage, String>> = request
        .messages
        .iter()
        .map(|m| build_email(m.sender.as_deref(), &m.subject, &m.body))
        .collect();

    let valid: Vec<EmailMessage> = parsed.iter().filter_map(|p| p.as_ref().ok().cloned()).collect();
    let outcomes = state.triage_service.triage_batch(&valid, tone).await;

    // Rows that failed parsing already hold their error entry; pipeline
    // outcomes fill the remaining slots in order.
    let mut entries: Vec<Option<BatchEntry>> = parsed
        .iter()
        .map(|p| {
            p.as_ref()
                .err()
                .map(|message| BatchEntry::Failure { error: message.clone() })
        })
        .collect();

    let open_slots = entries.iter_mut().filter(|slot| slot.is_none());
    for (slot, outcome) in open_slots.zip(outcomes) {
        *slot = Some(match outcome {
            Ok(result) => BatchEntry::Success { ok: result.into() },
            Err(e) => BatchEntry::Failure {
                error: sanitize_error_message(&e.to_string()),
            },
        });
    }

    Ok(Json(BatchTriageResponse {
        results: entries.into_iter().flatten().collect(),
    }))
}

/// Build the domain message from raw request fields
fn build_email(sender: Option<&str>, subject: &str, body: &str) -> Result<EmailMessage, String> {
    let sender = match sender {
        Some(raw) if !raw.trim().is_empty() => Some(Sender::new(raw).map_err(|e| e.to_string())?),
        _ => None,
    };
    EmailMessage::new(sender, subject, body).map_err(|e| e.to_string())
}
