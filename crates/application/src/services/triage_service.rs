//! Triage service
//!
//! Orchestrates the full pipeline for one email: text preparation,
//! urgency classification, intent summarization, and reply drafting
//! with graceful fallback from LLM generation to template replies.

use std::{fmt, sync::Arc};

use domain::{EmailMessage, ReplyDraft, ReplySource, Tone, TriageResult, Urgency};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ClassificationError, ClassifierPort, InferencePort, ReplyContext, TemplatePort},
    services::{intent_summarizer::IntentSummarizer, text_cleaner::TextCleaner},
};

/// Triage service for processing incoming emails
pub struct TriageService {
    classifier: Arc<dyn ClassifierPort>,
    inference: Arc<dyn InferencePort>,
    templates: Arc<dyn TemplatePort>,
    cleaner: TextCleaner,
    summarizer: IntentSummarizer,
}

impl fmt::Debug for TriageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriageService").finish_non_exhaustive()
    }
}

impl TriageService {
    /// Create a new triage service
    pub fn new(
        classifier: Arc<dyn ClassifierPort>,
        inference: Arc<dyn InferencePort>,
        templates: Arc<dyn TemplatePort>,
    ) -> Self {
        Self {
            classifier,
            inference,
            templates,
            cleaner: TextCleaner::new(),
            summarizer: IntentSummarizer::new(),
        }
    }

    /// Run the full pipeline for a single email
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    pub async fn triage(
        &self,
        email: &EmailMessage,
        tone: Tone,
    ) -> Result<TriageResult, ApplicationError> {
        let input = self.cleaner.classifier_input(email);
        let scores = self
            .classifier
            .classify(&input)
            .await
            .map_err(map_classification_error)?;
        let urgency = scores.top();

        debug!(urgency = %urgency, "Classified email");

        let cleaned_body = self.cleaner.clean(&email.body);
        let intent = self.summarizer.summarize(&email.subject, &cleaned_body);
        let reply = self
            .draft_reply(email, &cleaned_body, tone, urgency, &intent)
            .await?;

        info!(urgency = %urgency, source = %reply.source, "Triage completed");

        Ok(TriageResult::new(scores, intent, reply))
    }

    /// Run the pipeline over a batch of emails
    ///
    /// One failing email never aborts the batch; each row carries its
    /// own result.
    #[instrument(skip(self, emails), fields(count = emails.len()))]
    pub async fn triage_batch(
        &self,
        emails: &[EmailMessage],
        tone: Tone,
    ) -> Vec<Result<TriageResult, ApplicationError>> {
        let mut results = Vec::with_capacity(emails.len());
        for (index, email) in emails.iter().enumerate() {
            match self.triage(email, tone).await {
                Ok(result) => results.push(Ok(result)),
                Err(err) => {
                    warn!(index, error = %err, "Batch email failed");
                    results.push(Err(err));
                },
            }
        }
        results
    }

    /// Report backend readiness
    pub async fn readiness(&self) -> ReadinessReport {
        let generation_enabled = self.inference.is_enabled();
        ReadinessReport {
            classifier: self.classifier.name().to_string(),
            classifier_healthy: self.classifier.is_healthy().await,
            generation_enabled,
            inference_healthy: if generation_enabled {
                self.inference.is_healthy().await
            } else {
                false
            },
            model: generation_enabled.then(|| self.inference.current_model().to_string()),
        }
    }

    async fn draft_reply(
        &self,
        email: &EmailMessage,
        cleaned_body: &str,
        tone: Tone,
        urgency: Urgency,
        intent: &str,
    ) -> Result<ReplyDraft, ApplicationError> {
        let subject = ReplyDraft::subject_for(&email.subject);
        let context = ReplyContext {
            greeting_name: email.greeting_name(),
            subject: email.subject.clone(),
            intent: intent.to_string(),
            urgency,
            tone,
        };

        if self.inference.is_enabled() {
            let prompt = build_reply_prompt(email, cleaned_body, tone, urgency);
            match self.inference.generate_reply(&prompt).await {
                Ok(result) if result.content.trim().is_empty() => {
                    warn!(
                        model = %result.model,
                        "Reply generation returned empty content, falling back to template"
                    );
                },
                Ok(result) => {
                    debug!(
                        model = %result.model,
                        latency_ms = result.latency_ms,
                        "Generated reply"
                    );
                    let body = self
                        .templates
                        .render_envelope(&context, result.content.trim())
                        .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                    return Ok(ReplyDraft::new(subject, body, ReplySource::Llm));
                },
                Err(err) => {
                    warn!(error = %err, "Reply generation failed, falling back to template");
                },
            }
        }

        let body = self
            .templates
            .render_reply(&context)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

        Ok(ReplyDraft::new(subject, body, ReplySource::Template))
    }
}

/// Backend readiness snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    /// Name of the active classification backend
    pub classifier: String,
    /// Whether the classification backend is reachable
    pub classifier_healthy: bool,
    /// Whether LLM reply generation is configured
    pub generation_enabled: bool,
    /// Whether the LLM provider is reachable
    pub inference_healthy: bool,
    /// Configured generation model, when enabled
    pub model: Option<String>,
}

fn build_reply_prompt(
    email: &EmailMessage,
    cleaned_body: &str,
    tone: Tone,
    urgency: Urgency,
) -> String {
    format!(
        "Write the body of a {tone} reply to the email below. It was triaged as {urgency} priority.\n\
         Do not include a subject line, greeting, or sign-off. Do not invent facts. \
         Keep it under 180 words.\n\n\
         Subject: {subject}\n\n{cleaned_body}",
        subject = email.subject,
    )
}

fn map_classification_error(err: ClassificationError) -> ApplicationError {
    match err {
        ClassificationError::ServiceUnavailable(msg) => ApplicationError::ExternalService(msg),
        ClassificationError::RateLimited => ApplicationError::RateLimited,
        ClassificationError::InvalidResponse(msg) => ApplicationError::Classification(msg),
        ClassificationError::EmptyInput => {
            ApplicationError::Classification("no text to classify".to_string())
        },
    }
}
