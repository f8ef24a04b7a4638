//! Template port for canned reply rendering

use domain::{Tone, Urgency};
use thiserror::Error;

/// Errors from the template backend
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template registered for the requested reply
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Rendering failed
    #[error("Template rendering failed: {0}")]
    RenderFailed(String),
}

/// Everything a reply template can interpolate
#[derive(Debug, Clone)]
pub struct ReplyContext {
    /// Name to greet the sender with, when known
    pub greeting_name: Option<String>,
    /// Original subject line
    pub subject: String,
    /// One-line intent summary
    pub intent: String,
    /// Urgency the email was classified as
    pub urgency: Urgency,
    /// Requested writing style
    pub tone: Tone,
}

/// Port for rendering template replies
pub trait TemplatePort: Send + Sync {
    /// Render the canned reply for the given context, envelope included
    fn render_reply(&self, context: &ReplyContext) -> Result<String, TemplateError>;

    /// Wrap an already-written reply body in the greeting and signature
    /// envelope
    fn render_envelope(&self, context: &ReplyContext, body: &str)
    -> Result<String, TemplateError>;
}
