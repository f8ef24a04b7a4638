//! Wiremock tests for the zero-shot classification client

use domain::Urgency;
use integration_classifier::{
    ClassifierConfig, ClassifierError, UrgencyClassifier, ZeroShotClient,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn config_for_mock(server: &MockServer) -> ClassifierConfig {
    ClassifierConfig::default()
        .with_endpoint(server.uri())
        .with_api_token("hf-test")
}

fn classification_response(urgent: f64, normal: f64, low: f64) -> serde_json::Value {
    json!({
        "sequence": "Subject: test",
        "labels": ["Urgent", "Normal", "Low"],
        "scores": [urgent, normal, low]
    })
}

// ============================================================================
// Classification
// ============================================================================

#[tokio::test]
async fn classify_success_maps_scores() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(classification_response(
            0.82, 0.12, 0.06,
        )))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let scores = client
        .classify("Subject: Outage\n\nProduction is down")
        .await
        .unwrap();

    assert_eq!(scores.top(), Urgency::Urgent);
    assert!((scores.urgent() - 0.82).abs() < 1e-9);
    assert!((scores.low() - 0.06).abs() < 1e-9);
}

#[tokio::test]
async fn classify_sends_candidate_labels() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "inputs": "Subject: Hello\n\nJust checking in",
            "parameters": {
                "candidate_labels": ["Urgent", "Normal", "Low"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(classification_response(
            0.05, 0.85, 0.10,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let scores = client
        .classify("Subject: Hello\n\nJust checking in")
        .await
        .unwrap();

    assert_eq!(scores.top(), Urgency::Normal);
}

#[tokio::test]
async fn classify_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("authorization", "Bearer hf-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(classification_response(
            0.1, 0.2, 0.7,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let scores = client.classify("Weekly newsletter digest").await.unwrap();

    assert_eq!(scores.top(), Urgency::Low);
}

#[tokio::test]
async fn classify_normalizes_raw_scores() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(classification_response(
            0.5, 0.25, 0.25,
        )))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let scores = client.classify("some text").await.unwrap();

    let sum = scores.urgent() + scores.normal() + scores.low();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn empty_input_is_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(classification_response(
            0.1, 0.8, 0.1,
        )))
        .expect(0)
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let err = client.classify("   \n  ").await.unwrap_err();

    assert!(matches!(err, ClassifierError::EmptyInput));
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn server_error_maps_to_service_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "model is loading"})),
        )
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let err = client.classify("some text").await.unwrap_err();

    assert!(matches!(err, ClassifierError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn rate_limit_maps_to_dedicated_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let err = client.classify("some text").await.unwrap_err();

    assert!(matches!(err, ClassifierError::RateLimitExceeded));
}

#[tokio::test]
async fn client_error_maps_to_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let err = client.classify("some text").await.unwrap_err();

    assert!(matches!(err, ClassifierError::RequestFailed(_)));
}

#[tokio::test]
async fn invalid_json_maps_to_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let err = client.classify("some text").await.unwrap_err();

    assert!(matches!(err, ClassifierError::ParseError(_)));
}

#[tokio::test]
async fn foreign_labels_map_to_empty_scores() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labels": ["POSITIVE", "NEGATIVE"],
            "scores": [0.7, 0.3]
        })))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    let err = client.classify("some text").await.unwrap_err();

    assert!(matches!(err, ClassifierError::EmptyScores));
}

// ============================================================================
// Health checks
// ============================================================================

#[tokio::test]
async fn health_check_succeeds_when_endpoint_responds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"loaded": true})))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn health_check_fails_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ZeroShotClient::new(config_for_mock(&server)).unwrap();
    assert!(!client.is_healthy().await);
}
