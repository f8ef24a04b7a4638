//! Port definitions
//!
//! Traits the application layer depends on, implemented by
//! infrastructure adapters.

pub mod classifier_port;
pub mod inference_port;
pub mod template_port;

pub use classifier_port::{ClassificationError, ClassifierPort};
pub use inference_port::{InferencePort, InferenceResult};
pub use template_port::{ReplyContext, TemplateError, TemplatePort};
