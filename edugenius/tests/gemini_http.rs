//! GeminiClient wire behavior against a local mock server.
//!
//! The scenarios run inside one test because the endpoint override is a
//! process-global environment variable.


use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use edugenius::{GeminiClient, ModelClient, ModelError, ModelRequest};

fn request() -> ModelRequest {
    ModelRequest {
        prompt: "Say hello as JSON".to_string(),
        response_schema: json!({
            "type": "object",
            "properties": {"answer": {"type": "string"}},
            "required": ["answer"],
        }),
    }
}

async fn client_for(server: &MockServer) -> GeminiClient {
    std::env::set_var("GEMINI_API_URL", server.uri());
    GeminiClient::new("test-key", "gemini-2.0-flash")
}

#[tokio::test]
async fn generate_content_wire_behavior() {
    // Success: schema attached, api key header sent, candidate text parsed.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"answer\":\"hello\"}"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server).await;
    let response = client.generate(&request()).await.unwrap();
    assert_eq!(response.payload, json!({"answer": "hello"}));
    drop(server);

    // Non-success status maps to ModelError::Api with the status code.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;
    let client = client_for(&server).await;
    match client.generate(&request()).await.unwrap_err() {
        ModelError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("quota"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    drop(server);

    // Missing candidates maps to Empty.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;
    let client = client_for(&server).await;
    assert!(matches!(
        client.generate(&request()).await.unwrap_err(),
        ModelError::Empty
    ));
    drop(server);

    // Candidate text that is not JSON maps to InvalidPayload.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "not json at all"}]}
            }]
        })))
        .mount(&server)
        .await;
    let client = client_for(&server).await;
    assert!(matches!(
        client.generate(&request()).await.unwrap_err(),
        ModelError::InvalidPayload(_)
    ));

    std::env::remove_var("GEMINI_API_URL");
}
