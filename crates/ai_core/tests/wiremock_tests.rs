//! Integration tests for the provider engines using WireMock
//!
//! These tests mock the provider HTTP APIs to verify client behavior
//! without requiring real accounts.

use ai_core::{
    AnthropicEngine, InferenceEngine, InferenceError, InferenceRequest, OpenAiEngine,
    ProviderConfig,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, header_exists, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn openai_config_for_mock(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        base_url: base_url.to_string(),
        model: "test-model".to_string(),
        timeout_ms: 5000,
        ..ProviderConfig::openai().with_api_key("sk-test")
    }
}

fn anthropic_config_for_mock(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        base_url: base_url.to_string(),
        model: "test-claude".to_string(),
        timeout_ms: 5000,
        ..ProviderConfig::anthropic().with_api_key("sk-ant-test")
    }
}

/// Sample chat-completions success response
fn chat_completion_response() -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "model": "test-model",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Thanks for reaching out. We are on it."
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 42,
            "completion_tokens": 12,
            "total_tokens": 54
        }
    })
}

/// Sample Anthropic messages success response
fn messages_response() -> serde_json::Value {
    serde_json::json!({
        "id": "msg_123",
        "model": "test-claude",
        "content": [
            {"type": "text", "text": "Thanks for reaching out. We are on it."}
        ],
        "usage": {
            "input_tokens": 40,
            "output_tokens": 11
        }
    })
}

// =============================================================================
// OpenAI Engine Tests
// =============================================================================

mod openai_tests {
    use super::*;

    #[tokio::test]
    async fn generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let response = engine
            .generate(InferenceRequest::simple("Draft a reply"))
            .await
            .expect("generation should succeed");

        assert_eq!(response.model, "test-model");
        assert!(response.content.contains("Thanks for reaching out"));
        let usage = response.usage.expect("usage should be reported");
        assert_eq!(usage.prompt_tokens, 42);
        assert_eq!(usage.completion_tokens, 12);
        assert_eq!(usage.total_tokens, 54);
    }

    #[tokio::test]
    async fn system_prompt_is_sent_first() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "You are helpful"},
                    {"role": "user", "content": "Hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let response = engine
            .generate(InferenceRequest::with_system("You are helpful", "Hello"))
            .await;
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn config_defaults_are_applied_to_the_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "max_tokens": 300
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let response = engine.generate(InferenceRequest::simple("Hello")).await;
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::ServerError(_)));
    }

    #[tokio::test]
    async fn rate_limit_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::RateLimited));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"model": "test-model", "choices": []})),
            )
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        assert!(engine.health_check().await.expect("health check"));
    }

    #[tokio::test]
    async fn health_check_reports_unhealthy_on_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let engine = OpenAiEngine::new(openai_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        assert!(!engine.health_check().await.expect("health check"));
    }
}

// =============================================================================
// Anthropic Engine Tests
// =============================================================================

mod anthropic_tests {
    use super::*;

    #[tokio::test]
    async fn generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(messages_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = AnthropicEngine::new(anthropic_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let response = engine
            .generate(InferenceRequest::simple("Draft a reply"))
            .await
            .expect("generation should succeed");

        assert_eq!(response.model, "test-claude");
        assert!(response.content.contains("Thanks for reaching out"));
        let usage = response.usage.expect("usage should be reported");
        assert_eq!(usage.prompt_tokens, 40);
        assert_eq!(usage.completion_tokens, 11);
        assert_eq!(usage.total_tokens, 51);
    }

    #[tokio::test]
    async fn system_prompt_goes_in_the_system_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(body_partial_json(serde_json::json!({
                "system": "You are helpful",
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(messages_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = AnthropicEngine::new(anthropic_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let response = engine
            .generate(InferenceRequest::with_system("You are helpful", "Hello"))
            .await;
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn version_header_is_always_present() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header_exists("anthropic-version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(messages_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = AnthropicEngine::new(anthropic_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        assert!(engine.generate(InferenceRequest::simple("Hi")).await.is_ok());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let engine = AnthropicEngine::new(anthropic_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::ServerError(_)));
    }

    #[tokio::test]
    async fn rate_limit_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let engine = AnthropicEngine::new(anthropic_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::RateLimited));
    }

    #[tokio::test]
    async fn missing_text_block_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"model": "test-claude", "content": []})),
            )
            .mount(&mock_server)
            .await;

        let engine = AnthropicEngine::new(anthropic_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&mock_server)
            .await;

        let engine = AnthropicEngine::new(anthropic_config_for_mock(&mock_server.uri()))
            .expect("Failed to create engine");

        assert!(engine.health_check().await.expect("health check"));
    }
}
