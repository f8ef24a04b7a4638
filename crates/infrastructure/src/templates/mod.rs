//! Template engine for reply bodies and the envelope
//!
//! Uses Tera with templates embedded at compile time. The canned body is
//! the fallback used whenever no LLM provider is configured or the
//! provider call fails; the envelope wraps every reply regardless of
//! which path wrote the body.

use std::sync::Arc;

use application::ports::{ReplyContext, TemplateError, TemplatePort};
use domain::Tone;
use tera::{Context, Tera};
use tracing::debug;

use crate::config::ReplyConfig;

/// Embedded templates - compiled into the binary
mod embedded {
    pub const REPLY_BODY: &str = r"Thank you for your message about: {{ intent }}
{% if urgency == 'Urgent' %}
I understand this is time-critical. I am looking into it right now and
will get back to you with a resolution as soon as possible.
{% elif urgency == 'Low' %}
I have noted it and will follow up once the current queue clears. No
further action is needed from your side.
{% else %}
I will review the details and follow up with a full reply shortly.
{% endif %}";

    pub const ENVELOPE: &str = r"{{ greeting }}

{{ body }}

{{ signoff }}

{{ agent_name }}
{{ team_name }}";
}

/// Tera-backed implementation of the reply template port
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    agent_name: String,
    team_name: String,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("agent_name", &self.agent_name)
            .field("team_name", &self.team_name)
            .finish_non_exhaustive()
    }
}

fn map_tera_error(e: tera::Error) -> TemplateError {
    match e.kind {
        tera::ErrorKind::TemplateNotFound(name) => TemplateError::UnknownTemplate(name),
        _ => TemplateError::RenderFailed(e.to_string()),
    }
}

impl TemplateEngine {
    /// Create a new engine with the embedded templates loaded
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_template("reply/body.txt", embedded::REPLY_BODY)
            .map_err(|e| TemplateError::RenderFailed(e.to_string()))?;
        tera.add_raw_template("reply/envelope.txt", embedded::ENVELOPE)
            .map_err(|e| TemplateError::RenderFailed(e.to_string()))?;

        let signature = ReplyConfig::default();
        Ok(Self {
            tera: Arc::new(tera),
            agent_name: signature.agent_name,
            team_name: signature.team_name,
        })
    }

    /// Replace the signature names printed under the sign-off
    #[must_use]
    pub fn with_signature(
        mut self,
        agent_name: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Self {
        self.agent_name = agent_name.into();
        self.team_name = team_name.into();
        self
    }

    /// Greeting line for the requested tone
    ///
    /// Unknown senders get a plain "Hello," regardless of tone.
    fn greeting(tone: Tone, name: Option<&str>) -> String {
        match name {
            Some(n) => {
                let word = match tone {
                    Tone::Formal => "Dear",
                    Tone::Neutral => "Hello",
                    Tone::Friendly => "Hi",
                };
                format!("{word} {n},")
            },
            None => "Hello,".to_string(),
        }
    }

    /// Sign-off line for the requested tone
    const fn signoff(tone: Tone) -> &'static str {
        match tone {
            Tone::Formal => "Kind regards,",
            Tone::Neutral => "Best regards,",
            Tone::Friendly => "Cheers,",
        }
    }
}

impl TemplatePort for TemplateEngine {
    fn render_reply(&self, context: &ReplyContext) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("intent", &context.intent);
        ctx.insert("urgency", context.urgency.label());

        debug!(
            urgency = context.urgency.label(),
            tone = context.tone.label(),
            "Rendering template reply"
        );

        let body = self
            .tera
            .render("reply/body.txt", &ctx)
            .map_err(map_tera_error)?;
        self.render_envelope(context, body.trim())
    }

    fn render_envelope(
        &self,
        context: &ReplyContext,
        body: &str,
    ) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert(
            "greeting",
            &Self::greeting(context.tone, context.greeting_name.as_deref()),
        );
        ctx.insert("body", body.trim());
        ctx.insert("signoff", Self::signoff(context.tone));
        ctx.insert("agent_name", &self.agent_name);
        ctx.insert("team_name", &self.team_name);

        let rendered = self
            .tera
            .render("reply/envelope.txt", &ctx)
            .map_err(map_tera_error)?;
        Ok(rendered.trim().to_string())
    }
}
