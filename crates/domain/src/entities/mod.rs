//! Domain entities - Objects with identity and lifecycle

mod email_message;
mod reply_draft;
mod triage_result;

pub use email_message::EmailMessage;
pub use reply_draft::ReplyDraft;
pub use triage_result::TriageResult;
