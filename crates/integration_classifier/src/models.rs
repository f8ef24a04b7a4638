//! Zero-shot classification wire types
//!
//! Request and response shapes for the hosted zero-shot classification
//! task. The response carries parallel `labels`/`scores` arrays sorted
//! by descending score.

use serde::{Deserialize, Serialize};

/// Request payload for a zero-shot classification call
#[derive(Debug, Serialize)]
pub(crate) struct ZeroShotRequest {
    pub inputs: String,
    pub parameters: ZeroShotParameters,
}

/// Task parameters, currently just the candidate labels
#[derive(Debug, Serialize)]
pub(crate) struct ZeroShotParameters {
    pub candidate_labels: Vec<String>,
}

/// Raw classification response
///
/// `labels[i]` scored `scores[i]`. Extra fields such as the echoed
/// input sequence are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ZeroShotResponse {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_candidate_labels() {
        let request = ZeroShotRequest {
            inputs: "Server is down".to_string(),
            parameters: ZeroShotParameters {
                candidate_labels: vec!["Urgent".to_string(), "Normal".to_string()],
            },
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["inputs"], "Server is down");
        assert_eq!(json["parameters"]["candidate_labels"][0], "Urgent");
        assert_eq!(json["parameters"]["candidate_labels"][1], "Normal");
    }

    #[test]
    fn response_parses_parallel_arrays() {
        let json = r#"{
            "sequence": "Server is down",
            "labels": ["Urgent", "Normal", "Low"],
            "scores": [0.91, 0.06, 0.03]
        }"#;

        let response: ZeroShotResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.labels.len(), 3);
        assert_eq!(response.labels[0], "Urgent");
        assert!((response.scores[0] - 0.91).abs() < f64::EPSILON);
    }

    #[test]
    fn response_ignores_unknown_fields() {
        let json = r#"{"labels": ["Low"], "scores": [1.0], "warnings": ["slow model"]}"#;
        let response: ZeroShotResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.labels, vec!["Low"]);
    }
}
