//! Hosted zero-shot classification integration
//!
//! Client for an inference endpoint exposing the zero-shot classification
//! task: the email text goes in as `inputs` with the urgency labels as
//! candidates, label/score pairs come back.

pub mod client;
mod models;

pub use client::{ClassifierConfig, ClassifierError, UrgencyClassifier, ZeroShotClient};
pub use models::ZeroShotResponse;
